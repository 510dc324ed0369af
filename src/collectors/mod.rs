pub mod network;
pub mod temperature;

// Outcome of one fallback strategy. Absent means the source answered but had
// nothing for us; Failed means the source itself was unusable. Both let the
// chain continue, they only log differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirelessLink {
    pub ssid: String,
    pub signal_percent: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetReading {
    pub wireless: Option<WirelessLink>,
    pub has_internet: bool,
    pub local_address: Option<String>,
    pub wired_active: bool,
    pub wired_interface: Option<String>,
}
