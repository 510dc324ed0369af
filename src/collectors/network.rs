use crate::collectors::{Lookup, NetReading, WirelessLink};
use crate::runner::CommandRunner;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const PROBE_TARGET: &str = "1.1.1.1";
const WIRED_PREFIXES: [&str; 4] = ["eth", "eno", "enp", "ens"];
const PROC_WIRELESS: &str = "/proc/net/wireless";
const SYSFS_NET: &str = "/sys/class/net";

const NMCLI_TIMEOUT: Duration = Duration::from_secs(3);
const IWCONFIG_TIMEOUT: Duration = Duration::from_secs(3);
const IWGETID_TIMEOUT: Duration = Duration::from_secs(2);
const IP_TIMEOUT: Duration = Duration::from_secs(2);
// ping bounds itself with -W 2; the outer guard only covers a hung binary
const PING_TIMEOUT: Duration = Duration::from_secs(4);

pub async fn collect<R: CommandRunner>(runner: &R) -> NetReading {
    collect_from(runner, Path::new(PROC_WIRELESS), Path::new(SYSFS_NET)).await
}

pub(crate) async fn collect_from<R: CommandRunner>(
    runner: &R,
    proc_wireless: &Path,
    sysfs_net: &Path,
) -> NetReading {
    let wireless = wireless_link(runner, proc_wireless).await;
    let has_internet = ping_target(runner).await;
    let local_address = local_address(runner).await;
    let wired_active = wired_link_active(runner, sysfs_net).await;
    let wired_interface = default_route_device(runner)
        .await
        .filter(|iface| has_wired_prefix(iface));

    let mut reading = NetReading {
        wireless,
        has_internet,
        local_address,
        wired_active,
        wired_interface,
    };

    // An assigned address implies reachability even when ICMP is filtered.
    if reading.local_address.is_some() && !reading.has_internet {
        reading.has_internet = true;
    }

    reading
}

async fn wireless_link<R: CommandRunner>(
    runner: &R,
    proc_wireless: &Path,
) -> Option<WirelessLink> {
    match wifi_via_nmcli(runner).await {
        Lookup::Found(link) => return Some(link),
        Lookup::Absent => debug!("nmcli reports no active wifi"),
        Lookup::Failed => debug!("nmcli unusable, trying iwconfig"),
    }

    match wifi_via_iwconfig(runner).await {
        Lookup::Found(link) => return Some(link),
        Lookup::Absent => debug!("iwconfig reports no associated wifi"),
        Lookup::Failed => debug!("iwconfig unusable, trying /proc/net/wireless"),
    }

    match wifi_via_proc(runner, proc_wireless).await {
        Lookup::Found(link) => return Some(link),
        Lookup::Absent => debug!("no wireless rows in /proc/net/wireless"),
        Lookup::Failed => debug!("/proc/net/wireless unreadable"),
    }

    None
}

async fn wifi_via_nmcli<R: CommandRunner>(runner: &R) -> Lookup<WirelessLink> {
    let args = ["-t", "-f", "ACTIVE,SSID,SIGNAL", "dev", "wifi"];
    let output = match runner.run("nmcli", &args, NMCLI_TIMEOUT).await {
        Ok(output) if output.success => output,
        _ => return Lookup::Failed,
    };

    match parse_nmcli_wifi(&output.stdout) {
        Some(link) => Lookup::Found(link),
        None => Lookup::Absent,
    }
}

pub(crate) fn parse_nmcli_wifi(text: &str) -> Option<WirelessLink> {
    for line in text.lines() {
        if !line.starts_with("yes:") {
            continue;
        }
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() < 3 {
            continue;
        }
        let ssid = parts[1].trim();
        let signal = parts[2].trim();
        if ssid.is_empty() || signal.is_empty() {
            continue;
        }
        if !signal.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let Ok(percent) = signal.parse::<u8>() else {
            continue;
        };
        return Some(WirelessLink {
            ssid: ssid.to_string(),
            signal_percent: percent.min(100),
        });
    }
    None
}

async fn wifi_via_iwconfig<R: CommandRunner>(runner: &R) -> Lookup<WirelessLink> {
    let output = match runner.run("iwconfig", &[], IWCONFIG_TIMEOUT).await {
        Ok(output) if output.success => output,
        _ => return Lookup::Failed,
    };

    match parse_iwconfig(&output.stdout) {
        Some(link) => Lookup::Found(link),
        None => Lookup::Absent,
    }
}

pub(crate) fn parse_iwconfig(text: &str) -> Option<WirelessLink> {
    let mut in_wireless_block = false;
    let mut ssid: Option<String> = None;
    let mut signal: Option<u8> = None;

    for line in text.lines() {
        if is_iwconfig_block_start(line) {
            in_wireless_block = true;
        }
        if !in_wireless_block {
            continue;
        }

        if line.contains("ESSID:") {
            if let Some(name) = extract_quoted(line, "ESSID:\"") {
                if name != "off/any" {
                    ssid = Some(name);
                }
            }
        }

        if line.contains("Signal level=") {
            if let Some(dbm) = extract_signed_int(line, "Signal level=") {
                signal = Some(dbm_to_percent(dbm as f64));
                break;
            }
        }
    }

    match (ssid, signal) {
        (Some(ssid), Some(signal_percent)) if !ssid.is_empty() => Some(WirelessLink {
            ssid,
            signal_percent,
        }),
        _ => None,
    }
}

// A block opens on a non-indented "wlan0  IEEE 802.11 ..." line; everything
// indented below belongs to that interface.
fn is_iwconfig_block_start(line: &str) -> bool {
    let Some(first) = line.split_whitespace().next() else {
        return false;
    };
    if !line.starts_with(first) {
        return false;
    }
    if !first.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    line[first.len()..].trim_start().starts_with("IEEE 802.11")
}

fn extract_quoted(line: &str, marker: &str) -> Option<String> {
    let start = line.find(marker)? + marker.len();
    let rest = &line[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

fn extract_signed_int(line: &str, marker: &str) -> Option<i32> {
    let start = line.find(marker)? + marker.len();
    let digits: String = line[start..]
        .chars()
        .take_while(|c| *c == '-' || c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

// <= -100 dBm -> 0, >= -50 dBm -> 100, linear in between.
pub(crate) fn dbm_to_percent(dbm: f64) -> u8 {
    if dbm <= -100.0 {
        0
    } else if dbm >= -50.0 {
        100
    } else {
        (2.0 * (dbm + 100.0)).clamp(0.0, 100.0) as u8
    }
}

async fn wifi_via_proc<R: CommandRunner>(runner: &R, path: &Path) -> Lookup<WirelessLink> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!(error = %err, path = %path.display(), "cannot read wireless stats");
            return Lookup::Failed;
        }
    };

    for (iface, level) in parse_proc_wireless(&text) {
        let ssid = match runner
            .run("iwgetid", &[iface.as_str(), "-r"], IWGETID_TIMEOUT)
            .await
        {
            Ok(output) if output.success => output.stdout.trim().to_string(),
            _ => continue,
        };
        if ssid.is_empty() {
            continue;
        }

        // Negative values are dBm, anything else is an already-scaled quality.
        let signal_percent = if level < 0.0 {
            dbm_to_percent(level)
        } else {
            level.min(100.0) as u8
        };
        return Lookup::Found(WirelessLink {
            ssid,
            signal_percent,
        });
    }

    Lookup::Absent
}

// Two header lines, then "wlan0: 0000   54.  -53.  -256 ..." rows. The third
// field keeps its trailing dot, f64 parsing accepts it.
pub(crate) fn parse_proc_wireless(text: &str) -> Vec<(String, f64)> {
    text.lines()
        .skip(2)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return None;
            }
            let iface = parts[0].trim_end_matches(':').to_string();
            let level: f64 = parts[2].parse().ok()?;
            Some((iface, level))
        })
        .collect()
}

async fn ping_target<R: CommandRunner>(runner: &R) -> bool {
    let args = ["-c", "1", "-W", "2", PROBE_TARGET];
    matches!(
        runner.run("ping", &args, PING_TIMEOUT).await,
        Ok(output) if output.success
    )
}

async fn local_address<R: CommandRunner>(runner: &R) -> Option<String> {
    if let Ok(output) = runner
        .run("ip", &["route", "get", PROBE_TARGET], IP_TIMEOUT)
        .await
    {
        if output.success {
            if let Some(addr) = parse_route_field(&output.stdout, "src") {
                return Some(addr);
            }
        }
    }

    let output = runner.run("ip", &["addr", "show"], IP_TIMEOUT).await.ok()?;
    if !output.success {
        return None;
    }
    parse_first_inet(&output.stdout)
}

async fn default_route_device<R: CommandRunner>(runner: &R) -> Option<String> {
    let output = runner
        .run("ip", &["route", "get", PROBE_TARGET], IP_TIMEOUT)
        .await
        .ok()?;
    if !output.success {
        return None;
    }
    parse_route_field(&output.stdout, "dev")
}

pub(crate) fn parse_route_field(text: &str, field: &str) -> Option<String> {
    for line in text.lines() {
        if !line.contains(field) {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if let Some(pos) = parts.iter().position(|p| *p == field) {
            if let Some(value) = parts.get(pos + 1) {
                return Some((*value).to_string());
            }
        }
    }
    None
}

pub(crate) fn parse_first_inet(text: &str) -> Option<String> {
    for line in text.lines() {
        if !line.contains("inet ") || line.contains("127.0.0.1") {
            continue;
        }
        let Some(pos) = line.find("inet ") else {
            continue;
        };
        let Some(token) = line[pos + 5..].split_whitespace().next() else {
            continue;
        };
        let addr: String = token
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if !addr.is_empty() {
            return Some(addr);
        }
    }
    None
}

async fn wired_link_active<R: CommandRunner>(runner: &R, sysfs_net: &Path) -> bool {
    let args = ["-t", "-f", "TYPE,STATE", "connection", "show", "--active"];
    if let Ok(output) = runner.run("nmcli", &args, NMCLI_TIMEOUT).await {
        if output.success && has_active_ethernet_connection(&output.stdout) {
            return true;
        }
    }

    if let Ok(output) = runner.run("ip", &["link", "show"], IP_TIMEOUT).await {
        if output.success && has_wired_link_up(&output.stdout) {
            return true;
        }
    }

    wired_up_in_sysfs(sysfs_net)
}

pub(crate) fn has_active_ethernet_connection(text: &str) -> bool {
    text.lines().any(|line| {
        line.starts_with("ethernet:activated") || line.contains("802-3-ethernet:activated")
    })
}

pub(crate) fn has_wired_link_up(text: &str) -> bool {
    text.lines().any(is_wired_link_up_line)
}

// "2: enp3s0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 ... state UP ..."
fn is_wired_link_up_line(line: &str) -> bool {
    let mut parts = line.splitn(3, ':');
    let Some(index) = parts.next() else {
        return false;
    };
    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let Some(name) = parts.next() else {
        return false;
    };
    has_wired_prefix(name.trim()) && line.contains("state UP")
}

fn has_wired_prefix(name: &str) -> bool {
    WIRED_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

pub(crate) fn wired_up_in_sysfs(root: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(root) else {
        return false;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !has_wired_prefix(name) {
            continue;
        }
        if let Ok(state) = std::fs::read_to_string(entry.path().join("operstate")) {
            if state.trim() == "up" {
                return true;
            }
        }
    }
    false
}
