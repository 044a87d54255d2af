//! Declarative schema of the notification rule parameters.
//!
//! Mirrors the admin configuration form: which parameters exist, how they are
//! edited and which are optional. Pure metadata for administration tooling,
//! printed as JSON by the binary's `form` subcommand; nothing here feeds the
//! runtime mapping.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FormSpec {
    pub title: &'static str,
    pub optional_keys: &'static [&'static str],
    pub elements: Vec<FormElement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormElement {
    pub key: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub help: &'static str,
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// Editor widget for one parameter.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Url,
    Text {
        #[serde(skip_serializing_if = "str::is_empty")]
        placeholder: &'static str,
    },
    Password,
    Integer {
        min: i64,
        default: i64,
    },
    /// A checkbox whose presence fixes the parameter to `"True"`.
    FixedValue,
    Dropdown {
        choices: &'static [(&'static str, &'static str)],
    },
    /// Nested group of elements (the display-mode selector).
    Group {
        elements: Vec<FormElement>,
    },
}

/// The full parameter form, element order matching the admin UI.
pub fn parameter_form() -> FormSpec {
    FormSpec {
        title: "Create notification with the following parameters",
        optional_keys: &[
            "inote_api_insecureconnection",
            "inote_msg_popup_or_fs",
            "inote_msg_showticker",
            "inote_msg_exclude",
            "inote_msg_notifyreceive",
            "inote_msg_notifyacknowledge",
            "inote_msg_showonwinlogononly",
            "inote_msg_showonwinlogon",
            "inote_msg_homeoffice_or_networkrange",
            "checkmkUrl",
        ],
        elements: vec![
            FormElement {
                key: "inote_api_url",
                title: "The URL to the IDERI note API",
                help: "Example: 'https://<servername>:<port>/IDERInote/api'.",
                kind: ElementKind::Url,
            },
            FormElement {
                key: "inote_api_insecureconnection",
                title: "Allow insecure server connections when using SSL.",
                help: "Ignore unverified HTTPS request warnings. Use with caution.",
                kind: ElementKind::FixedValue,
            },
            FormElement {
                key: "inote_api_username",
                title: "Username",
                help: "The user name of the IDERI note API user.",
                kind: ElementKind::Text {
                    placeholder: r"<domain>\<username>",
                },
            },
            FormElement {
                key: "inote_api_userpass",
                title: "The password of the IDERI note API user.",
                help: "",
                kind: ElementKind::Password,
            },
            FormElement {
                key: "inote_msg_addressingmode",
                title: "IDERI note AddressingMode:",
                help: "Choose an IDERI note addressing mode.",
                kind: ElementKind::Dropdown {
                    choices: &[
                        ("UserOnly", "Send message to users only"),
                        ("UserAndComputer", "Send message to users and computers"),
                        ("ComputerOnly", "Send message to computers only"),
                    ],
                },
            },
            FormElement {
                key: "inote_msg_duration",
                title: "Message duration (minutes)",
                help: "The duration of the IDERI note message in minutes.",
                kind: ElementKind::Integer { min: 0, default: 0 },
            },
            FormElement {
                key: "inote_msg_recipient",
                title: "IDERI note message recipients.",
                help: "Comma separated, each entry qualified with its domain.",
                kind: ElementKind::Text {
                    placeholder: r"<dom>\<user>, <dom>\<group>, <dom>\<computer>$",
                },
            },
            FormElement {
                key: "inote_msg_exclude",
                title: "IDERI note message excludes.",
                help: "Comma separated, each entry qualified with its domain.",
                kind: ElementKind::Text {
                    placeholder: r"<dom>\<user>, <dom>\<group>, <dom>\<computer>$",
                },
            },
            FormElement {
                key: "inote_msg_popup_or_fs",
                title: "Show message in popup or fullscreen",
                help: "",
                kind: ElementKind::Group {
                    elements: vec![FormElement {
                        key: "selection",
                        title: "Select how to display the message:",
                        help: "",
                        kind: ElementKind::Dropdown {
                            choices: &[
                                ("showpopup", "Show in popup"),
                                ("showfullscreen", "Show in full screen"),
                                (
                                    "showfullscreenandlock",
                                    "Show in full screen and lock workstation",
                                ),
                            ],
                        },
                    }],
                },
            },
            FormElement {
                key: "inote_msg_showticker",
                title: "Show message in the ticker",
                help: "",
                kind: ElementKind::FixedValue,
            },
            FormElement {
                key: "inote_msg_notifyreceive",
                title: "Notify IDERI note server when message is received.",
                help: "",
                kind: ElementKind::FixedValue,
            },
            FormElement {
                key: "inote_msg_notifyacknowledge",
                title: "Notify IDERI note server when message is acknowledged.",
                help: "",
                kind: ElementKind::FixedValue,
            },
            FormElement {
                key: "inote_msg_showonwinlogon",
                title: "Show IDERI note message on the logon screen.",
                help: "Only effective with an addressing mode including computers.",
                kind: ElementKind::FixedValue,
            },
            FormElement {
                key: "inote_msg_showonwinlogononly",
                title: "Show IDERI note message on the logon screen only.",
                help: "Only effective with an addressing mode including computers.",
                kind: ElementKind::FixedValue,
            },
            FormElement {
                key: "checkmkUrl",
                title: "The URL to the Checkmk web interface.",
                help: "Adds a link to the host or service into the message. \
                       Links are only shown in popup messages.",
                kind: ElementKind::Url,
            },
            FormElement {
                key: "inote_plugin_loglevel",
                title: "Log mode:",
                help: "Levels 'Debug' and 'Trace' write extensive amounts of \
                       data to the notification log.",
                kind: ElementKind::Dropdown {
                    choices: &[
                        ("1", "Standard"),
                        ("2", "Verbose"),
                        ("4", "Debug"),
                        ("8", "Trace"),
                    ],
                },
            },
        ],
    }
}
