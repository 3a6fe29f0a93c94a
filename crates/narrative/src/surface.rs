//! Drawing targets for presentation tasks.

/// What presentation tasks draw into.
///
/// The host maps these calls onto its UI widgets. Each task only touches the
/// properties it animates.
pub trait Surface {
    fn set_text(&mut self, text: &str);
    fn set_alpha(&mut self, alpha: f32);
    /// Displacement of the shaken object from its rest position.
    fn set_offset(&mut self, x: f32, y: f32);
    /// `None` clears the notice line.
    fn set_notice(&mut self, notice: Option<&str>);
}

/// Headless panel state. Used by non-graphical hosts and in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub text: String,
    pub alpha: f32,
    pub offset: (f32, f32),
    pub notice: Option<String>,
}

impl Surface for Panel {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_offset(&mut self, x: f32, y: f32) {
        self.offset = (x, y);
    }

    fn set_notice(&mut self, notice: Option<&str>) {
        self.notice = notice.map(str::to_string);
    }
}
