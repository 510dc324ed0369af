use crate::collectors::NetReading;
use serde::Serialize;

const WIRED_ICON: &str = "󰈀";
const OFFLINE_ICON: &str = "󰤭";

// The one artifact a probe prints. `class` keys into the bar's style sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub text: String,
    #[serde(rename = "class")]
    pub css_class: String,
    pub tooltip: String,
}

impl OutputRecord {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"text":"","class":"unknown","tooltip":""}"#.to_string()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBucket {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl TempBucket {
    pub fn classify(celsius: i32) -> Self {
        if celsius < 40 {
            Self::Excellent
        } else if celsius < 60 {
            Self::Good
        } else if celsius < 80 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn status_word(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

pub fn temperature_record(reading: Option<i32>) -> OutputRecord {
    let Some(celsius) = reading else {
        return OutputRecord {
            text: "N/A°C".to_string(),
            css_class: "unknown".to_string(),
            tooltip: "Temperature unavailable".to_string(),
        };
    };

    let bucket = TempBucket::classify(celsius);
    OutputRecord {
        text: format!("{celsius}°C"),
        css_class: bucket.css_class().to_string(),
        tooltip: format!("CPU Temperature: {celsius}°C ({})", bucket.status_word()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalBucket {
    Excellent,
    Good,
    Fair,
    Weak,
}

impl SignalBucket {
    pub fn classify(percent: u8) -> Self {
        if percent >= 76 {
            Self::Excellent
        } else if percent >= 51 {
            Self::Good
        } else if percent >= 26 {
            Self::Fair
        } else {
            Self::Weak
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Weak => "weak",
        }
    }

    pub fn status_word(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Weak => "Weak",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Excellent => "󰤨",
            Self::Good => "󰤥",
            Self::Fair => "󰤢",
            Self::Weak => "󰤟",
        }
    }
}

// Branch order matters: wifi beats wired beats limited beats offline.
pub fn network_record(reading: &NetReading) -> OutputRecord {
    if let Some(link) = &reading.wireless {
        let bucket = SignalBucket::classify(link.signal_percent);
        let connection_status = if reading.has_internet {
            "Connected"
        } else {
            "Limited connectivity"
        };
        let mut tooltip = format!(
            "WiFi: {}\nSignal: {}% ({})\nStatus: {}",
            link.ssid,
            link.signal_percent,
            bucket.status_word(),
            connection_status
        );
        if let Some(addr) = &reading.local_address {
            tooltip.push_str(&format!("\nIP: {addr}"));
        }
        return OutputRecord {
            text: format!("{} {}% {}", bucket.icon(), link.signal_percent, link.ssid),
            css_class: bucket.css_class().to_string(),
            tooltip,
        };
    }

    if let Some(addr) = &reading.local_address {
        let wired = reading.wired_active || reading.wired_interface.is_some();
        let iface_part = reading
            .wired_interface
            .as_ref()
            .map(|iface| format!(" ({iface})"))
            .unwrap_or_default();

        if reading.has_internet {
            return if wired {
                OutputRecord {
                    text: format!("{WIRED_ICON} Ethernet{iface_part}"),
                    css_class: "ethernet".to_string(),
                    tooltip: format!(
                        "Wired connection{iface_part}\nIP: {addr}\nStatus: Connected"
                    ),
                }
            } else {
                OutputRecord {
                    text: format!("{WIRED_ICON} Connected"),
                    css_class: "ethernet".to_string(),
                    tooltip: format!("Network connection\nIP: {addr}\nStatus: Connected"),
                }
            };
        }

        return if wired {
            OutputRecord {
                text: format!("{WIRED_ICON} Limited{iface_part}"),
                css_class: "disconnected".to_string(),
                tooltip: format!(
                    "Ethernet connected{iface_part}\nIP: {addr}\nStatus: Limited connectivity"
                ),
            }
        } else {
            OutputRecord {
                text: format!("{WIRED_ICON} Limited"),
                css_class: "disconnected".to_string(),
                tooltip: format!(
                    "Network connection\nIP: {addr}\nStatus: Limited connectivity"
                ),
            }
        };
    }

    OutputRecord {
        text: format!("{OFFLINE_ICON} OFFLINE"),
        css_class: "disconnected".to_string(),
        tooltip: "No network connection".to_string(),
    }
}
