use serde::Serialize;
use web_sys::window;

pub const TABLET_MIN_WIDTH: f64 = 768.0;
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_viewport_width(width: f64) -> Self {
        if width < TABLET_MIN_WIDTH {
            DeviceClass::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn current() -> Option<Self> {
        let width = window()?.inner_width().ok()?.as_f64()?;
        Some(Self::from_viewport_width(width))
    }
}
