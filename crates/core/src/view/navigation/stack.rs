use std::fmt;

/// Contract violations of [`Stack`].
///
/// Both variants are caller bugs: navigation graphs must never push the same
/// identifier twice or pop to an identifier they never pushed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error("pushed frame already exists on stack by id: {0}")]
    DuplicateFrame(String),

    #[error("frame by id {0} doesn't exist on stack")]
    MissingFrame(String),
}

/// One pushed navigational unit.
///
/// Identity is the `id`: two frames are equal iff their ids match.
#[derive(Clone)]
pub struct Frame<C> {
    id: String,
    content: C,
}

impl<C> Frame<C> {
    pub fn new(id: impl Into<String>, content: C) -> Self {
        Frame {
            id: id.into(),
            content,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &C {
        &self.content
    }
}

impl<C> PartialEq for Frame<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> Eq for Frame<C> {}

impl<C> fmt::Debug for Frame<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame").field("id", &self.id).finish()
    }
}

/// Ordered frames, oldest first.
///
/// The top is the last frame. An empty stack means the root content is shown.
#[derive(Clone)]
pub struct Stack<C> {
    frames: Vec<Frame<C>>,
}

impl<C> Default for Stack<C> {
    fn default() -> Self {
        Stack { frames: Vec::new() }
    }
}

impl<C> fmt::Debug for Stack<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.frames.iter().map(Frame::id))
            .finish()
    }
}

impl<C> Stack<C> {
    pub fn new() -> Self {
        Stack::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame<C>] {
        &self.frames
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn peek(&self) -> Option<&Frame<C>> {
        self.frames.last()
    }

    /// Appends `frame`, refusing identifiers already on the stack.
    pub fn try_push(&mut self, frame: Frame<C>) -> Result<(), StackError> {
        if self.contains(&frame.id) {
            return Err(StackError::DuplicateFrame(frame.id));
        }

        self.frames.push(frame);
        Ok(())
    }

    /// Appends `frame`.
    ///
    /// # Panics
    ///
    /// Panics if a frame with the same id is already on the stack.
    pub fn push(&mut self, frame: Frame<C>) {
        if let Err(err) = self.try_push(frame) {
            panic!("{err}");
        }
    }

    /// Removes the top frame. Does nothing on an empty stack.
    pub fn pop_to_previous(&mut self) -> Option<Frame<C>> {
        self.frames.pop()
    }

    /// Truncates the stack so the frame `id` becomes the top.
    ///
    /// Returns the removed frames, oldest first.
    pub fn try_pop_to(&mut self, id: &str) -> Result<Vec<Frame<C>>, StackError> {
        let index = self
            .position(id)
            .ok_or_else(|| StackError::MissingFrame(id.to_string()))?;

        Ok(self.frames.split_off(index + 1))
    }

    /// # Panics
    ///
    /// Panics if no frame with `id` is on the stack.
    pub fn pop_to(&mut self, id: &str) -> Vec<Frame<C>> {
        match self.try_pop_to(id) {
            Ok(removed) => removed,
            Err(err) => panic!("{err}"),
        }
    }

    /// Removes every frame, going back to the root content.
    pub fn pop_to_root(&mut self) -> Vec<Frame<C>> {
        std::mem::take(&mut self.frames)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.frames.iter().position(|frame| frame.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(ids: &[&str]) -> Stack<()> {
        let mut stack = Stack::new();
        for id in ids {
            stack.push(Frame::new(*id, ()));
        }
        stack
    }

    fn ids(stack: &Stack<()>) -> Vec<&str> {
        stack.frames().iter().map(Frame::id).collect()
    }

    #[test]
    fn test_push_keeps_insertion_order_and_peek_returns_last() {
        for count in 0..6 {
            let names: Vec<String> = (0..count).map(|i| format!("frame-{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let stack = stack_of(&refs);

            assert_eq!(stack.len(), count);
            assert_eq!(stack.peek().map(Frame::id), refs.last().copied());
        }
    }

    #[test]
    fn test_duplicate_push_is_rejected_without_mutation() {
        let mut stack = stack_of(&["A", "B"]);

        let result = stack.try_push(Frame::new("A", ()));

        assert_eq!(result, Err(StackError::DuplicateFrame("A".to_string())));
        assert_eq!(ids(&stack), vec!["A", "B"]);
    }

    #[test]
    #[should_panic(expected = "pushed frame already exists on stack by id: A")]
    fn test_duplicate_push_panics() {
        let mut stack = stack_of(&["A", "B"]);
        stack.push(Frame::new("A", ()));
    }

    #[test]
    fn test_pop_to_leaves_matching_frame_on_top() {
        let mut stack = stack_of(&["A", "B", "C", "D"]);

        let removed = stack.pop_to("B");

        assert_eq!(ids(&stack), vec!["A", "B"]);
        assert_eq!(stack.peek().map(Frame::id), Some("B"));
        assert_eq!(
            removed.iter().map(Frame::id).collect::<Vec<_>>(),
            vec!["C", "D"]
        );
    }

    #[test]
    fn test_pop_to_first_frame() {
        let mut stack = stack_of(&["A", "B", "C"]);

        stack.pop_to("A");

        assert_eq!(ids(&stack), vec!["A"]);
    }

    #[test]
    fn test_pop_to_top_is_a_no_op() {
        let mut stack = stack_of(&["A", "B"]);

        assert!(stack.pop_to("B").is_empty());
        assert_eq!(ids(&stack), vec!["A", "B"]);
    }

    #[test]
    fn test_pop_to_missing_id_is_rejected_without_mutation() {
        let mut stack = stack_of(&["A", "B"]);

        let result = stack.try_pop_to("Z");

        assert!(matches!(result, Err(StackError::MissingFrame(id)) if id == "Z"));
        assert_eq!(ids(&stack), vec!["A", "B"]);
    }

    #[test]
    #[should_panic(expected = "frame by id Z doesn't exist on stack")]
    fn test_pop_to_missing_id_panics() {
        let mut stack = stack_of(&["A"]);
        stack.pop_to("Z");
    }

    #[test]
    fn test_pop_to_previous_on_empty_stack() {
        let mut stack: Stack<()> = Stack::new();

        assert!(stack.pop_to_previous().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_to_root_clears_everything() {
        let mut stack = stack_of(&["A", "B", "C"]);

        assert_eq!(stack.pop_to_root().len(), 3);
        assert!(stack.peek().is_none());

        assert!(stack.pop_to_root().is_empty());
    }

    #[test]
    fn test_frames_compare_by_id_only() {
        assert_eq!(Frame::new("A", 1), Frame::new("A", 2));
        assert_ne!(Frame::new("A", 1), Frame::new("B", 1));
    }
}
