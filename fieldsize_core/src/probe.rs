// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The measurement probe contract.

/// Styles applied to every probe before the typography copy.
///
/// `all: initial` drops any cascaded page styling. The probe is then pinned
/// out of flow with a zero-size, hidden box; `overflow: scroll` makes the
/// scroll width report the full unclipped text extent and `white-space: pre`
/// keeps the text on one line.
pub const PROBE_STYLES: [(&str, &str); 10] = [
    ("all", "initial"),
    ("position", "absolute"),
    ("top", "0px"),
    ("left", "0px"),
    ("width", "0px"),
    ("height", "0px"),
    ("visibility", "hidden"),
    ("overflow", "scroll"),
    ("white-space", "pre"),
    ("pointer-events", "none"),
];

/// A rendering surface that can host throwaway measurement probes.
///
/// In a browser this is the page body; elsewhere any off-screen surface that
/// can report a scroll width works. Implementations must keep probes hidden
/// from assistive technology and input.
pub trait ProbeSurface {
    /// The probe node type.
    type Probe;
    /// Errors raised by the underlying platform.
    type Error;

    /// Creates a detached probe.
    fn create_probe(&self) -> Result<Self::Probe, Self::Error>;

    /// Sets one inline style property on the probe.
    fn set_style(&self, probe: &Self::Probe, name: &str, value: &str) -> Result<(), Self::Error>;

    /// Replaces the probe's text content.
    fn set_text(&self, probe: &Self::Probe, text: &str);

    /// Inserts the probe into the surface so it gets laid out.
    fn attach(&self, probe: &Self::Probe) -> Result<(), Self::Error>;

    /// Reads the attached probe's scroll width in CSS pixels.
    fn scroll_width(&self, probe: &Self::Probe) -> f64;

    /// Removes the probe from the surface.
    fn detach(&self, probe: &Self::Probe);
}

/// An attached probe. Dropping it detaches the probe.
pub(crate) struct AttachedProbe<'a, S: ProbeSurface + ?Sized> {
    surface: &'a S,
    probe: &'a S::Probe,
}

impl<'a, S: ProbeSurface + ?Sized> AttachedProbe<'a, S> {
    pub(crate) fn attach(surface: &'a S, probe: &'a S::Probe) -> Result<Self, S::Error> {
        surface.attach(probe)?;
        Ok(Self { surface, probe })
    }

    pub(crate) fn scroll_width(&self) -> f64 {
        self.surface.scroll_width(self.probe)
    }
}

impl<S: ProbeSurface + ?Sized> Drop for AttachedProbe<'_, S> {
    fn drop(&mut self) {
        self.surface.detach(self.probe);
    }
}
