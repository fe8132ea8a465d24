// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! When to measure: the per-input management state machine.
//!
//! A [`FieldSizing`] controller is fed the tracked inputs of one text field
//! ([`Signals`]) plus its native content-change notifications. While the mode
//! is `content` it keeps the field's inline width in sync with the
//! measurement; when management stops it hands the width back to the caller.

use alloc::format;
use alloc::string::{String, ToString};

use crate::engine::{InputElement, MeasureError, measure};
use crate::mode::SizingMode;
use crate::probe::ProbeSurface;

/// An externally supplied `width` style.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StyleWidth {
    /// No width was supplied.
    #[default]
    Unset,
    /// A bare number, interpreted as CSS pixels.
    Pixels(f64),
    /// Any CSS width value.
    Css(String),
}

impl StyleWidth {
    /// Normalizes the width to a CSS string. [`StyleWidth::Unset`] is the
    /// empty string, which clears an inline width.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Unset => String::new(),
            Self::Pixels(px) => format!("{px}px"),
            Self::Css(css) => css.clone(),
        }
    }
}

impl From<f64> for StyleWidth {
    fn from(px: f64) -> Self {
        Self::Pixels(px)
    }
}

impl From<&str> for StyleWidth {
    fn from(css: &str) -> Self {
        Self::Css(css.to_string())
    }
}

impl From<String> for StyleWidth {
    fn from(css: String) -> Self {
        Self::Css(css)
    }
}

/// The tracked inputs of one field. A change to any of them re-runs
/// [`FieldSizing::update`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signals {
    /// The bound value, or `None` for an uncontrolled field.
    pub value: Option<String>,
    /// The requested sizing mode.
    pub mode: SizingMode,
    /// The caller's own `width` style.
    pub style_width: StyleWidth,
}

impl Signals {
    /// Signals for an uncontrolled field with no width of its own.
    #[must_use]
    pub fn new(mode: SizingMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Sets the bound value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the caller's `width` style.
    #[must_use]
    pub fn with_style_width(mut self, style_width: impl Into<StyleWidth>) -> Self {
        self.style_width = style_width.into();
        self
    }
}

/// Whether a field's width is under measurement control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ManagementState {
    /// Native sizing; the engine is never invoked.
    #[default]
    Unmanaged,
    /// The engine's result is applied as the field's width.
    ContentManaged,
}

/// What a controller call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Nothing changed.
    Unchanged,
    /// Management started; bind the native content-change listener.
    Entered,
    /// Still managed; the width was measured again.
    Remeasured,
    /// Management stopped and the caller's width was restored; unbind the
    /// native content-change listener.
    Left,
}

/// The lifecycle controller for one text field.
#[derive(Clone, Debug, Default)]
pub struct FieldSizing {
    state: ManagementState,
    signals: Option<Signals>,
}

impl FieldSizing {
    /// Creates an unmounted, unmanaged controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current management state.
    #[must_use]
    pub fn state(&self) -> ManagementState {
        self.state
    }

    /// Returns `true` while native content-change notifications should be
    /// forwarded to [`FieldSizing::handle_native_input`].
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.state == ManagementState::ContentManaged
    }

    /// The last signals seen, if mounted.
    #[must_use]
    pub fn signals(&self) -> Option<&Signals> {
        self.signals.as_ref()
    }

    /// Mounts or updates the field with its current tracked inputs.
    ///
    /// Unchanged signals are a no-op after the first call. If measuring fails
    /// the field keeps its previous width, but the controller still records
    /// the new signals and state.
    pub fn update<E, S>(
        &mut self,
        element: &E,
        surface: &S,
        signals: Signals,
    ) -> Result<Transition, MeasureError<S::Error>>
    where
        E: InputElement + ?Sized,
        S: ProbeSurface + ?Sized,
    {
        if self.signals.as_ref() == Some(&signals) {
            return Ok(Transition::Unchanged);
        }
        let mode = signals.mode;
        self.signals = Some(signals);

        if mode.is_content() {
            let transition = match self.state {
                ManagementState::Unmanaged => Transition::Entered,
                ManagementState::ContentManaged => Transition::Remeasured,
            };
            self.state = ManagementState::ContentManaged;
            log::debug!("field sizing {transition:?} (mode {mode})");
            self.apply(element, surface)?;
            Ok(transition)
        } else if self.state == ManagementState::ContentManaged {
            log::debug!("field sizing released (mode {mode})");
            self.release(element);
            Ok(Transition::Left)
        } else {
            Ok(Transition::Unchanged)
        }
    }

    /// Re-measures after the field changed its own content, e.g. an
    /// uncontrolled field the caller does not track.
    ///
    /// Returns `true` if the width was re-applied.
    pub fn handle_native_input<E, S>(
        &self,
        element: &E,
        surface: &S,
    ) -> Result<bool, MeasureError<S::Error>>
    where
        E: InputElement + ?Sized,
        S: ProbeSurface + ?Sized,
    {
        if !self.is_listening() {
            return Ok(false);
        }
        self.apply(element, surface)?;
        Ok(true)
    }

    /// Unmounts the field, restoring the caller's last known width (or
    /// clearing the inline width) if it was managed.
    pub fn teardown<E: InputElement + ?Sized>(&mut self, element: &E) -> Transition {
        let transition = if self.is_listening() {
            self.release(element);
            Transition::Left
        } else {
            Transition::Unchanged
        };
        self.signals = None;
        transition
    }

    fn apply<E, S>(&self, element: &E, surface: &S) -> Result<(), MeasureError<S::Error>>
    where
        E: InputElement + ?Sized,
        S: ProbeSurface + ?Sized,
    {
        let width = measure(element, surface)?;
        element.set_inline_width(&width.to_string());
        Ok(())
    }

    fn release<E: InputElement + ?Sized>(&mut self, element: &E) {
        let width = self
            .signals
            .as_ref()
            .map(|signals| signals.style_width.to_css())
            .unwrap_or_default();
        element.set_inline_width(&width);
        self.state = ManagementState::Unmanaged;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use fieldsize_text::HeuristicTextMeasurer;

    use super::*;
    use crate::headless::HeadlessSurface;
    use crate::test_support::{FakeInput, RecordingSurface, monospace, padded_border_box};

    fn surface() -> HeadlessSurface<HeuristicTextMeasurer> {
        HeadlessSurface::new(HeuristicTextMeasurer)
    }

    #[test]
    fn style_width_normalizes_like_inline_styles() {
        assert_eq!(StyleWidth::Unset.to_css(), "");
        assert_eq!(StyleWidth::from(120.0).to_css(), "120px");
        assert_eq!(StyleWidth::from(12.5).to_css(), "12.5px");
        assert_eq!(StyleWidth::from("50%").to_css(), "50%");
    }

    #[test]
    fn content_mode_measures_on_mount() {
        let input = FakeInput::new("Hello", monospace(&[]));
        let mut sizing = FieldSizing::new();
        let transition = sizing
            .update(&input, &surface(), Signals::new(SizingMode::Content).with_value("Hello"))
            .unwrap();
        assert_eq!(transition, Transition::Entered);
        assert_eq!(sizing.state(), ManagementState::ContentManaged);
        assert!(sizing.is_listening());
        assert_eq!(input.width(), "48px");
    }

    #[test]
    fn other_modes_never_touch_the_width() {
        let surface = RecordingSurface::default();
        for mode in [SizingMode::Fixed, SizingMode::Unset] {
            let input = FakeInput::new("Hello", monospace(&[]));
            let mut sizing = FieldSizing::new();
            let transition = sizing
                .update(&input, &surface, Signals::new(mode).with_style_width(80.0))
                .unwrap();
            assert_eq!(transition, Transition::Unchanged);
            assert!(!sizing.is_listening());
            assert_eq!(input.width_writes(), 0);
            assert_eq!(sizing.handle_native_input(&input, &surface), Ok(false));
        }
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn value_changes_remeasure_with_a_single_write() {
        let surface = surface();
        let input = FakeInput::new("ab", monospace(&[]));
        let mut sizing = FieldSizing::new();
        let signals = Signals::new(SizingMode::Content).with_value("ab");
        sizing.update(&input, &surface, signals.clone()).unwrap();
        assert_eq!(input.width(), "20px");

        input.type_text("abcd");
        let transition = sizing
            .update(&input, &surface, signals.with_value("abcd"))
            .unwrap();
        assert_eq!(transition, Transition::Remeasured);
        assert_eq!(input.width(), "39px");
        assert_eq!(input.width_writes(), 2);
    }

    #[test]
    fn unchanged_signals_are_ignored() {
        let surface = RecordingSurface::default();
        let input = FakeInput::new("x", monospace(&[]));
        let mut sizing = FieldSizing::new();
        let signals = Signals::new(SizingMode::Content).with_value("x");
        sizing.update(&input, &surface, signals.clone()).unwrap();
        let transition = sizing.update(&input, &surface, signals).unwrap();
        assert_eq!(transition, Transition::Unchanged);
        assert_eq!(input.width_writes(), 1);
    }

    #[test]
    fn native_input_events_cover_uncontrolled_fields() {
        let surface = surface();
        let input = FakeInput::new("", padded_border_box()).with_placeholder("hi");
        let mut sizing = FieldSizing::new();
        sizing
            .update(&input, &surface, Signals::new(SizingMode::Content))
            .unwrap();
        assert_eq!(input.width(), "calc(20px + 20px + 20px + 10px + 10px)");

        input.type_text("hello");
        assert_eq!(sizing.handle_native_input(&input, &surface), Ok(true));
        assert_eq!(input.width(), "calc(48px + 20px + 20px + 10px + 10px)");
    }

    #[test]
    fn leaving_content_mode_restores_the_callers_width() {
        let surface = surface();
        let input = FakeInput::new("Hello", monospace(&[]));
        let mut sizing = FieldSizing::new();
        let signals = Signals::new(SizingMode::Content).with_style_width("10em");
        sizing.update(&input, &surface, signals.clone()).unwrap();
        assert_eq!(input.width(), "48px");

        let fixed = Signals {
            mode: SizingMode::Fixed,
            ..signals
        };
        assert_eq!(
            sizing.update(&input, &surface, fixed).unwrap(),
            Transition::Left
        );
        assert_eq!(input.width(), "10em");
        assert!(!sizing.is_listening());
        assert_eq!(sizing.handle_native_input(&input, &surface), Ok(false));
    }

    #[test]
    fn teardown_restores_or_clears_the_width() {
        let surface = surface();

        let input = FakeInput::new("Hello", monospace(&[]));
        let mut sizing = FieldSizing::new();
        sizing
            .update(&input, &surface, Signals::new(SizingMode::Content).with_style_width(200.0))
            .unwrap();
        assert_eq!(sizing.teardown(&input), Transition::Left);
        assert_eq!(input.width(), "200px");
        assert_eq!(sizing.signals(), None);

        let input = FakeInput::new("Hello", monospace(&[]));
        let mut sizing = FieldSizing::new();
        sizing
            .update(&input, &surface, Signals::new(SizingMode::Content))
            .unwrap();
        sizing.teardown(&input);
        assert_eq!(input.width(), "");
        assert_eq!(sizing.state(), ManagementState::Unmanaged);
    }

    #[test]
    fn remounting_with_the_same_signals_measures_again() {
        let surface = surface();
        let input = FakeInput::new("Hello", monospace(&[]));
        let mut sizing = FieldSizing::new();
        let signals = Signals::new(SizingMode::Content).with_value("Hello");
        sizing.update(&input, &surface, signals.clone()).unwrap();
        sizing.teardown(&input);
        assert_eq!(input.width(), "");

        let transition = sizing.update(&input, &surface, signals).unwrap();
        assert_eq!(transition, Transition::Entered);
        assert!(sizing.is_listening());
        assert_eq!(input.width(), "48px");
        assert_eq!(input.width_writes(), 3);
    }

    #[test]
    fn teardown_of_an_unmanaged_field_leaves_it_alone() {
        let input = FakeInput::new("Hello", monospace(&[]));
        let mut sizing = FieldSizing::new();
        sizing
            .update(&input, &surface(), Signals::new(SizingMode::Fixed))
            .unwrap();
        assert_eq!(sizing.teardown(&input), Transition::Unchanged);
        assert_eq!(input.width_writes(), 0);
    }

    #[test]
    fn measurement_errors_keep_the_previous_width() {
        let failing = RecordingSurface {
            reject_style: Some("all"),
            ..RecordingSurface::default()
        };
        let input = FakeInput::new("Hello", monospace(&[]));
        let mut sizing = FieldSizing::new();
        let result = sizing.update(&input, &failing, Signals::new(SizingMode::Content));
        assert!(result.is_err());
        assert_eq!(input.width_writes(), 0);
        assert_eq!(sizing.state(), ManagementState::ContentManaged);
    }
}
