use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Message priority, ordered from lowest to highest.
///
/// Derived from the monitoring state, never user-supplied. Serializes to the
/// integer value the IDERI note API expects.
///
/// # Examples
///
/// ```
/// use inote_common::types::Priority;
///
/// assert!(Priority::Alert > Priority::Information);
/// assert_eq!(Priority::Warning.to_string(), "Warning");
/// assert_eq!(serde_json::to_string(&Priority::Alert).unwrap(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Information = 0,
    Warning = 1,
    Alert = 2,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Information => write!(f, "Information"),
            Priority::Warning => write!(f, "Warning"),
            Priority::Alert => write!(f, "Alert"),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Delivery target class for a message.
///
/// Wire values match the IDERI note API. Parsed from the exact variant name
/// as the admin form emits it.
///
/// # Examples
///
/// ```
/// use inote_common::types::AddressingMode;
///
/// let mode: AddressingMode = "ComputerOnly".parse().unwrap();
/// assert_eq!(mode, AddressingMode::ComputerOnly);
/// assert!("computeronly".parse::<AddressingMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    UserOnly = 0x0000,
    UserAndComputer = 0x1000,
    ComputerOnly = 0x2000,
}

impl std::str::FromStr for AddressingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UserOnly" => Ok(AddressingMode::UserOnly),
            "UserAndComputer" => Ok(AddressingMode::UserAndComputer),
            "ComputerOnly" => Ok(AddressingMode::ComputerOnly),
            _ => Err(format!("unknown addressing mode: {s}")),
        }
    }
}

impl Serialize for AddressingMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(*self as u32)
    }
}

/// Serializes a UTC timestamp as `YYYY-MM-DDTHH:MM:SS`, no timezone suffix.
/// The API defines all message times as UTC by construction.
fn compact_utc<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// The message record sent to `POST /v1/messages`.
///
/// Field names serialize exactly as the IDERI note API expects them. Built
/// with per-event defaults, mutated field by field by the parameter mapper,
/// consumed once by the dispatcher.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    #[serde(rename = "TEXT")]
    pub text: String,
    #[serde(rename = "STARTTIMEUTC", serialize_with = "compact_utc")]
    pub start_time_utc: DateTime<Utc>,
    #[serde(rename = "ENDTIMEUTC", serialize_with = "compact_utc")]
    pub end_time_utc: DateTime<Utc>,
    #[serde(rename = "LINKTARGET")]
    pub link_target: String,
    #[serde(rename = "LINKTEXT")]
    pub link_text: String,
    #[serde(rename = "NETWORKRANGEIDS")]
    pub network_range_ids: Vec<u32>,
    #[serde(rename = "PRIORITY")]
    pub priority: Priority,
    #[serde(rename = "NOTIFYRECEIVE")]
    pub notify_receive: bool,
    #[serde(rename = "NOTIFYACKNOWLEDGE")]
    pub notify_acknowledge: bool,
    #[serde(rename = "OPTNODELIVERYIFREVACK")]
    pub opt_no_delivery_if_rev_ack: bool,
    #[serde(rename = "OPTNODELIVERYIFACKONOTHERCOMP")]
    pub opt_no_delivery_if_ack_on_other_comp: bool,
    #[serde(rename = "OPTNODELIVERYIFLOGGEDINAFTERMSGSTART")]
    pub opt_no_delivery_if_logged_in_after_msg_start: bool,
    #[serde(rename = "SHOWPOPUP")]
    pub show_popup: bool,
    #[serde(rename = "SHOWTICKER")]
    pub show_ticker: bool,
    #[serde(rename = "SHOWFULLSCREEN")]
    pub show_fullscreen: bool,
    #[serde(rename = "SHOWFULLSCREENANDLOCK")]
    pub show_fullscreen_and_lock: bool,
    #[serde(rename = "SHOWLINKMAXIMIZED")]
    pub show_link_maximized: bool,
    #[serde(rename = "ADDRESSINGMODE")]
    pub addressing_mode: AddressingMode,
    #[serde(rename = "SHOWONWINLOGON")]
    pub show_on_win_logon: bool,
    #[serde(rename = "SHOWONWINLOGONONLY")]
    pub show_on_win_logon_only: bool,
    #[serde(rename = "HOMEOFFICEUSERSEXCLUDE")]
    pub home_office_users_exclude: bool,
    #[serde(rename = "HOMEOFFICEUSERSONLY")]
    pub home_office_users_only: bool,
    #[serde(rename = "RECIPIENT")]
    pub recipient: Vec<String>,
    #[serde(rename = "EXCLUDE")]
    pub exclude: Vec<String>,
    #[serde(rename = "NETWORKRANGEEXCLUDE")]
    pub network_range_exclude: bool,
    #[serde(rename = "PUSH")]
    pub push: bool,
}

impl OutboundMessage {
    /// Per-event defaults: empty text and lists, all flags off, lowest
    /// priority, both timestamps set to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            text: String::new(),
            start_time_utc: now,
            end_time_utc: now,
            link_target: String::new(),
            link_text: String::new(),
            network_range_ids: Vec::new(),
            priority: Priority::Information,
            notify_receive: false,
            notify_acknowledge: false,
            opt_no_delivery_if_rev_ack: false,
            opt_no_delivery_if_ack_on_other_comp: false,
            opt_no_delivery_if_logged_in_after_msg_start: false,
            show_popup: false,
            show_ticker: false,
            show_fullscreen: false,
            show_fullscreen_and_lock: false,
            show_link_maximized: false,
            addressing_mode: AddressingMode::UserOnly,
            show_on_win_logon: false,
            show_on_win_logon_only: false,
            home_office_users_exclude: false,
            home_office_users_only: false,
            recipient: Vec::new(),
            exclude: Vec::new(),
            network_range_exclude: false,
            push: false,
        }
    }
}

impl Default for OutboundMessage {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}
