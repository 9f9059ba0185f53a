use palette::Srgb;
use serde::{Deserialize, Serialize};

/// RGB color used for console output, serializable in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub Srgb<u8>);
