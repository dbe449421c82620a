use super::style::Style;
use super::{Content, RenderContext, Renderer};
use crate::binding::Binding;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;
use tracing::debug;

pub const DEFAULT_STEP: f32 = 0.01;

type EditingCallback = Rc<dyn Fn(bool)>;

/// A control picking a value within a range.
///
/// ```
/// use veneer_core::binding::State;
/// use veneer_core::outline::{Outline, OutlineRenderer};
/// use veneer_core::view::slider::Slider;
/// use veneer_core::view::style::Styles;
/// use veneer_core::view::RenderContext;
///
/// let volume = State::new(5.0);
/// let slider = Slider::<OutlineRenderer>::new(volume.binding()).bounds(0.0..=10.0).step(1.0);
/// let styles = Styles::new();
/// let mut cx = RenderContext::new(&OutlineRenderer, &styles);
///
/// assert!(matches!(slider.render(&mut cx), Outline::Slider { .. }));
/// ```
pub struct Slider<R: Renderer> {
    value: Binding<f32>,
    bounds: RangeInclusive<f32>,
    step: f32,
    on_editing_changed: Option<EditingCallback>,
    label: Option<Content<R>>,
    minimum_value_label: Option<Content<R>>,
    maximum_value_label: Option<Content<R>>,
}

impl<R: Renderer> Slider<R> {
    pub fn new(value: Binding<f32>) -> Self {
        Slider {
            value,
            bounds: 0.0..=1.0,
            step: DEFAULT_STEP,
            on_editing_changed: None,
            label: None,
            minimum_value_label: None,
            maximum_value_label: None,
        }
    }

    /// Reversed bounds are swapped. Bounds that aren't finite are ignored.
    pub fn bounds(mut self, bounds: RangeInclusive<f32>) -> Self {
        let (start, end) = bounds.into_inner();
        if !start.is_finite() || !end.is_finite() {
            debug!(start, end, "ignoring non-finite slider bounds");
            return self;
        }
        self.bounds = if start <= end {
            start..=end
        } else {
            end..=start
        };
        self
    }

    /// Distance between valid values. A step that isn't positive disables snapping.
    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn on_editing_changed(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.on_editing_changed = Some(Rc::new(callback));
        self
    }

    pub fn label(mut self, label: Content<R>) -> Self {
        self.label = Some(label);
        self
    }

    pub fn value_labels(mut self, minimum: Content<R>, maximum: Content<R>) -> Self {
        self.minimum_value_label = Some(minimum);
        self.maximum_value_label = Some(maximum);
        self
    }

    pub fn render(&self, cx: &mut RenderContext<'_, R>) -> R::View {
        let label = self.label.as_ref().map(|label| label(cx));
        let minimum_value_label = self.minimum_value_label.as_ref().map(|label| label(cx));
        let maximum_value_label = self.maximum_value_label.as_ref().map(|label| label(cx));

        let configuration = SliderStyleConfiguration {
            label,
            minimum_value_label,
            maximum_value_label,
            bounds: self.bounds.clone(),
            step: self.step,
            value: self.value.clone(),
            on_editing_changed: self.on_editing_changed.clone(),
        };
        cx.styles().slider().make_body(cx.renderer, configuration)
    }
}

/// What a slider style gets to draw.
#[derive(Clone)]
pub struct SliderStyleConfiguration<V> {
    pub label: Option<V>,
    pub minimum_value_label: Option<V>,
    pub maximum_value_label: Option<V>,
    pub bounds: RangeInclusive<f32>,
    pub step: f32,
    value: Binding<f32>,
    on_editing_changed: Option<EditingCallback>,
}

impl<V> fmt::Debug for SliderStyleConfiguration<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderStyleConfiguration")
            .field("value", &self.value)
            .field("bounds", &self.bounds)
            .field("step", &self.step)
            .finish()
    }
}

impl<V> SliderStyleConfiguration<V> {
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    pub fn binding(&self) -> &Binding<f32> {
        &self.value
    }

    /// Writes `value` clamped into the bounds and snapped to the step.
    pub fn set_value(&self, value: f32) {
        self.value.set(self.constrain(value));
    }

    /// Position of the value within the bounds, mapped into `0..=1`.
    pub fn fraction(&self) -> f32 {
        let (start, end) = (*self.bounds.start(), *self.bounds.end());
        if end <= start {
            return 0.0;
        }
        ((self.value() - start) / (end - start)).clamp(0.0, 1.0)
    }

    /// Moves the value to `fraction` of the way through the bounds.
    pub fn set_fraction(&self, fraction: f32) {
        let (start, end) = (*self.bounds.start(), *self.bounds.end());
        self.set_value(start + fraction.clamp(0.0, 1.0) * (end - start));
    }

    pub fn begin_editing(&self) {
        if let Some(callback) = &self.on_editing_changed {
            callback(true);
        }
    }

    pub fn end_editing(&self) {
        if let Some(callback) = &self.on_editing_changed {
            callback(false);
        }
    }

    fn constrain(&self, value: f32) -> f32 {
        let (start, end) = (*self.bounds.start(), *self.bounds.end());
        let value = value.clamp(start, end);
        if !(self.step > 0.0 && self.step.is_finite()) {
            return value;
        }
        let snapped = start + ((value - start) / self.step).round() * self.step;
        snapped.clamp(start, end)
    }
}

/// Forwards to [`Renderer::native_slider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSliderStyle;

impl<R: Renderer> Style<R, SliderStyleConfiguration<R::View>> for NativeSliderStyle {
    fn make_body(&self, renderer: &R, configuration: SliderStyleConfiguration<R::View>) -> R::View {
        renderer.native_slider(configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::State;
    use crate::outline::{Outline, OutlineRenderer};
    use crate::view::constant;
    use crate::view::style::{FnStyle, Styles};
    use std::cell::RefCell;

    fn configuration(
        value: &State<f32>,
        bounds: RangeInclusive<f32>,
        step: f32,
    ) -> SliderStyleConfiguration<Outline> {
        SliderStyleConfiguration {
            label: None,
            minimum_value_label: None,
            maximum_value_label: None,
            bounds,
            step,
            value: value.binding(),
            on_editing_changed: None,
        }
    }

    #[test]
    fn test_set_value_clamps_and_snaps() {
        let value = State::new(0.0);
        let configuration = configuration(&value, 0.0..=10.0, 2.5);

        configuration.set_value(6.0);
        assert_eq!(value.get(), 5.0);

        configuration.set_value(42.0);
        assert_eq!(value.get(), 10.0);

        configuration.set_value(-3.0);
        assert_eq!(value.get(), 0.0);
    }

    #[test]
    fn test_zero_step_does_not_snap() {
        let value = State::new(0.0);
        let configuration = configuration(&value, 0.0..=1.0, 0.0);

        configuration.set_value(0.333);

        assert_eq!(value.get(), 0.333);
    }

    #[test]
    fn test_fraction() {
        let value = State::new(15.0);
        let configuration = configuration(&value, 10.0..=20.0, 1.0);

        assert_eq!(configuration.fraction(), 0.5);

        configuration.set_fraction(1.0);
        assert_eq!(value.get(), 20.0);

        let degenerate = self::configuration(&value, 3.0..=3.0, 1.0);
        assert_eq!(degenerate.fraction(), 0.0);
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let value = State::new(0.5);
        let slider = Slider::<OutlineRenderer>::new(value.binding()).bounds(1.0..=0.0);

        assert_eq!(slider.bounds, 0.0..=1.0);
    }

    #[test]
    fn test_non_finite_bounds_are_ignored() {
        let value = State::new(0.5);
        let slider = Slider::<OutlineRenderer>::new(value.binding())
            .bounds(0.0..=10.0)
            .bounds(0.0..=f32::NAN)
            .bounds(f32::NEG_INFINITY..=1.0);

        assert_eq!(slider.bounds, 0.0..=10.0);

        let configuration = configuration(&value, slider.bounds.clone(), 1.0);
        configuration.set_value(12.0);
        assert_eq!(value.get(), 10.0);
    }

    #[test]
    fn test_editing_callback() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&events);
        let value = State::new(0.0);
        let styles = Styles::new().slider_style(FnStyle::new(
            |renderer: &OutlineRenderer, configuration: SliderStyleConfiguration<Outline>| {
                configuration.begin_editing();
                configuration.set_value(0.5);
                configuration.end_editing();
                renderer.empty()
            },
        ));
        let mut cx = RenderContext::new(&OutlineRenderer, &styles);

        Slider::new(value.binding())
            .step(0.25)
            .on_editing_changed(move |editing| seen.borrow_mut().push(editing))
            .render(&mut cx);

        assert_eq!(*events.borrow(), vec![true, false]);
        assert_eq!(value.get(), 0.5);
    }

    #[test]
    fn test_labels_are_rendered_in_context() {
        let value = State::new(0.25);
        let styles = Styles::new();
        let mut cx = RenderContext::new(&OutlineRenderer, &styles);

        let outline = Slider::new(value.binding())
            .label(constant(Outline::Text("Volume".to_string())))
            .value_labels(
                constant(Outline::Text("0".to_string())),
                constant(Outline::Text("1".to_string())),
            )
            .render(&mut cx);

        assert!(outline.contains_text("Volume"));
        assert!(matches!(outline, Outline::Slider { value, .. } if value == 0.25));
    }
}
