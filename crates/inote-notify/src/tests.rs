use crate::client::ApiClient;
use crate::error::NotifyError;
use crate::params::{apply_parameters, coerce, Coerced};
use crate::{form, link, priority, template};
use chrono::{Duration, TimeZone, Utc};
use inote_common::context::EventContext;
use inote_common::types::{AddressingMode, OutboundMessage, Priority};

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

// ── Priority derivation ──

#[test]
fn host_state_priority_table() {
    assert_eq!(priority::from_host_state("UP"), Priority::Information);
    assert_eq!(priority::from_host_state("DOWN"), Priority::Alert);
    assert_eq!(priority::from_host_state("UNREACHABLE"), Priority::Warning);
    assert_eq!(priority::from_host_state("GARBAGE"), Priority::Warning);
}

#[test]
fn service_state_priority_table() {
    assert_eq!(priority::from_service_state("OK"), Priority::Information);
    assert_eq!(priority::from_service_state("WARNING"), Priority::Warning);
    assert_eq!(priority::from_service_state("CRITICAL"), Priority::Alert);
    assert_eq!(priority::from_service_state("UNKNOWN"), Priority::Warning);
    assert_eq!(priority::from_service_state("GARBAGE"), Priority::Warning);
}

#[test]
fn event_priority_picks_host_or_service_state() {
    let host = EventContext::from_pairs([("WHAT", "HOST"), ("HOSTSTATE", "DOWN")]);
    assert_eq!(priority::for_event(&host).unwrap(), Priority::Alert);

    let service = EventContext::from_pairs([("WHAT", "SERVICE"), ("SERVICESTATE", "OK")]);
    assert_eq!(priority::for_event(&service).unwrap(), Priority::Information);

    let missing = EventContext::from_pairs([("WHAT", "HOST")]);
    let err = priority::for_event(&missing).unwrap_err();
    assert!(matches!(err, NotifyError::MissingContext(ref key) if key == "HOSTSTATE"));
}

// ── Parameter mapper ──

#[test]
fn duration_sets_start_and_end() {
    let ctx = EventContext::from_pairs([("PARAMETER_INOTE_MSG_DURATION", "90")]);
    let now = fixed_now();
    let mut message = OutboundMessage::new(now);
    apply_parameters(&ctx, &mut message, now).unwrap();
    assert_eq!(message.start_time_utc, now);
    assert_eq!(message.end_time_utc, now + Duration::minutes(90));
}

#[test]
fn zero_duration_keeps_end_equal_to_start() {
    let ctx = EventContext::from_pairs([("PARAMETER_INOTE_MSG_DURATION", "0")]);
    let now = fixed_now();
    let mut message = OutboundMessage::new(now);
    apply_parameters(&ctx, &mut message, now).unwrap();
    assert_eq!(message.start_time_utc, message.end_time_utc);
}

#[test]
fn non_integer_duration_is_a_fatal_input_error() {
    let ctx = EventContext::from_pairs([("PARAMETER_INOTE_MSG_DURATION", "soon")]);
    let mut message = OutboundMessage::new(fixed_now());
    let err = apply_parameters(&ctx, &mut message, fixed_now()).unwrap_err();
    assert!(matches!(err, NotifyError::InvalidDuration(_)));
    assert!(!err.is_retryable());
}

#[test]
fn recipient_and_exclude_lists_are_split_and_trimmed() {
    let ctx = EventContext::from_pairs([
        ("PARAMETER_INOTE_MSG_RECIPIENT", "a, b ,c"),
        ("PARAMETER_INOTE_MSG_EXCLUDE", r"note\server01$ , note\GRP-IT"),
    ]);
    let mut message = OutboundMessage::new(fixed_now());
    apply_parameters(&ctx, &mut message, fixed_now()).unwrap();
    assert_eq!(message.recipient, vec!["a", "b", "c"]);
    assert_eq!(message.exclude, vec![r"note\server01$", r"note\GRP-IT"]);
}

#[test]
fn fullscreen_selection_sets_popup_and_fullscreen() {
    let ctx = EventContext::from_pairs([(
        "PARAMETER_INOTE_MSG_POPUP_OR_FS_SELECTION",
        "showfullscreen",
    )]);
    let mut message = OutboundMessage::new(fixed_now());
    apply_parameters(&ctx, &mut message, fixed_now()).unwrap();
    assert!(message.show_popup);
    assert!(message.show_fullscreen);
    assert!(!message.show_fullscreen_and_lock);
}

#[test]
fn popup_selection_sets_only_the_popup_flag() {
    let ctx = EventContext::from_pairs([("PARAMETER_INOTE_MSG_POPUP_OR_FS_SELECTION", "showpopup")]);
    let mut message = OutboundMessage::new(fixed_now());
    apply_parameters(&ctx, &mut message, fixed_now()).unwrap();
    assert!(message.show_popup);
    assert!(!message.show_fullscreen);
}

#[test]
fn addressing_mode_is_an_exact_name_lookup() {
    let ctx = EventContext::from_pairs([("PARAMETER_INOTE_MSG_ADDRESSINGMODE", "ComputerOnly")]);
    let mut message = OutboundMessage::new(fixed_now());
    apply_parameters(&ctx, &mut message, fixed_now()).unwrap();
    assert_eq!(message.addressing_mode, AddressingMode::ComputerOnly);

    let bad = EventContext::from_pairs([("PARAMETER_INOTE_MSG_ADDRESSINGMODE", "Everybody")]);
    let err = apply_parameters(&bad, &mut message, fixed_now()).unwrap_err();
    assert!(matches!(err, NotifyError::UnknownAddressingMode(_)));
    assert!(!err.is_retryable());
}

#[test]
fn coercion_tries_int_then_bool_then_string() {
    assert_eq!(coerce("42"), Coerced::Int(42));
    assert_eq!(coerce("-7"), Coerced::Int(-7));
    assert_eq!(coerce("True"), Coerced::Bool(true));
    assert_eq!(coerce("False"), Coerced::Bool(false));
    assert_eq!(coerce("true"), Coerced::Text("true".to_string()));
    assert_eq!(coerce("1.5"), Coerced::Text("1.5".to_string()));
}

#[test]
fn boolean_literals_apply_to_display_flags() {
    let ctx = EventContext::from_pairs([
        ("PARAMETER_INOTE_MSG_SHOWTICKER", "True"),
        ("PARAMETER_INOTE_MSG_NOTIFYRECEIVE", "False"),
    ]);
    let mut message = OutboundMessage::new(fixed_now());
    apply_parameters(&ctx, &mut message, fixed_now()).unwrap();
    assert!(message.show_ticker);
    assert!(!message.notify_receive);
}

#[test]
fn parameters_without_a_matching_field_are_ignored() {
    let ctx = EventContext::from_pairs([("PARAMETER_INOTE_MSG_WHATEVER", "True")]);
    let mut message = OutboundMessage::new(fixed_now());
    apply_parameters(&ctx, &mut message, fixed_now()).unwrap();
    let as_json = serde_json::to_value(&message).unwrap();
    assert!(as_json.get("WHATEVER").is_none());
}

// ── Link injector ──

fn host_link_context() -> EventContext {
    EventContext::from_pairs([
        ("PARAMETER_CHECKMKURL", "https://cmk.example.com"),
        ("WHAT", "HOST"),
        ("OMD_SITE", "prod"),
        ("HOSTURL", "view.py?host=srv1"),
    ])
}

#[test]
fn console_link_is_added_for_host_events() {
    let mut message = OutboundMessage::new(fixed_now());
    link::attach_link(&host_link_context(), &mut message).unwrap();
    assert_eq!(
        message.link_target,
        "https://cmk.example.com/prod/view.py?host=srv1"
    );
    assert_eq!(message.link_text, "Show in Checkmk");
}

#[test]
fn console_link_is_added_for_service_events() {
    let ctx = EventContext::from_pairs([
        ("PARAMETER_CHECKMKURL", "https://cmk.example.com"),
        ("WHAT", "SERVICE"),
        ("OMD_SITE", "prod"),
        ("SERVICEURL", "view.py?service=disk"),
    ]);
    let mut message = OutboundMessage::new(fixed_now());
    link::attach_link(&ctx, &mut message).unwrap();
    assert_eq!(
        message.link_target,
        "https://cmk.example.com/prod/view.py?service=disk"
    );
}

#[test]
fn fullscreen_flags_suppress_the_link() {
    for set_lock in [false, true] {
        let mut message = OutboundMessage::new(fixed_now());
        if set_lock {
            message.show_fullscreen_and_lock = true;
        } else {
            message.show_fullscreen = true;
        }
        link::attach_link(&host_link_context(), &mut message).unwrap();
        assert!(message.link_target.is_empty());
        assert!(message.link_text.is_empty());
    }
}

#[test]
fn link_is_a_noop_without_a_console_url() {
    let ctx = EventContext::from_pairs([("WHAT", "HOST")]);
    let mut message = OutboundMessage::new(fixed_now());
    link::attach_link(&ctx, &mut message).unwrap();
    assert!(message.link_target.is_empty());
}

#[test]
fn configured_link_with_missing_site_is_fatal() {
    let ctx = EventContext::from_pairs([
        ("PARAMETER_CHECKMKURL", "https://cmk.example.com"),
        ("WHAT", "HOST"),
        ("HOSTURL", "view.py?host=srv1"),
    ]);
    let mut message = OutboundMessage::new(fixed_now());
    let err = link::attach_link(&ctx, &mut message).unwrap_err();
    assert!(matches!(err, NotifyError::MissingContext(ref key) if key == "OMD_SITE"));
}

// ── Text composer ──

#[test]
fn host_problem_body_contains_state_line_and_transition() {
    let ctx = EventContext::from_pairs([
        ("WHAT", "HOST"),
        ("NOTIFICATIONTYPE", "PROBLEM"),
        ("HOSTNAME", "srv1"),
        ("HOSTALIAS", "srv1.example.com"),
        ("HOSTSTATE", "DOWN"),
        ("PREVIOUSHOSTHARDSHORTSTATE", "UP"),
        ("HOSTSHORTSTATE", "DOWN"),
        ("HOST_ADDRESS_4", "10.0.0.5"),
        ("HOSTOUTPUT", "CRITICAL - ping timed out"),
    ]);
    let body = template::compose_text(&ctx).unwrap();
    assert!(body.starts_with("[PROBLEM]"), "body was: {body}");
    assert!(body.contains("Host srv1 is DOWN."));
    assert!(body.contains("UP -> DOWN"));
    assert!(body.contains("Output:   CRITICAL - ping timed out"));
    // Unresolved placeholders (here: IPv6 address) must be removed.
    assert!(!body.contains('$'), "body was: {body}");
}

#[test]
fn service_body_uses_the_service_template() {
    let ctx = EventContext::from_pairs([
        ("WHAT", "SERVICE"),
        ("NOTIFICATIONTYPE", "RECOVERY"),
        ("HOSTNAME", "srv1"),
        ("SERVICEDESC", "Filesystem /"),
        ("SERVICESTATE", "OK"),
        ("PREVIOUSSERVICEHARDSHORTSTATE", "CRIT"),
        ("SERVICESHORTSTATE", "OK"),
        ("SERVICEOUTPUT", "OK - 42% used"),
    ]);
    let body = template::compose_text(&ctx).unwrap();
    assert!(body.contains("Service Filesystem / on srv1 is OK."));
    assert!(body.contains("CRIT -> OK"));
}

#[test]
fn downtime_phrase_is_title_cased() {
    let ctx = EventContext::from_pairs([
        ("WHAT", "SERVICE"),
        ("NOTIFICATIONTYPE", "DOWNTIMESTART"),
        ("SERVICESHORTSTATE", "OK"),
    ]);
    let body = template::compose_text(&ctx).unwrap();
    assert!(body.contains("Downtime Start (OK)"), "body was: {body}");

    let cancelled = EventContext::from_pairs([
        ("WHAT", "HOST"),
        ("NOTIFICATIONTYPE", "DOWNTIMECANCELLED"),
        ("HOSTSHORTSTATE", "UP"),
    ]);
    let body = template::compose_text(&cancelled).unwrap();
    assert!(body.contains("Downtime Cancelled (UP)"), "body was: {body}");
}

#[test]
fn flapping_phrases() {
    let start = EventContext::from_pairs([("WHAT", "HOST"), ("NOTIFICATIONTYPE", "FLAPPINGSTART")]);
    assert!(template::compose_text(&start).unwrap().contains("Started Flapping"));

    let stop = EventContext::from_pairs([
        ("WHAT", "HOST"),
        ("NOTIFICATIONTYPE", "FLAPPINGSTOP"),
        ("HOSTSHORTSTATE", "UP"),
    ]);
    assert!(template::compose_text(&stop).unwrap().contains("Stopped Flapping (UP)"));
}

#[test]
fn acknowledgement_phrase_names_the_author() {
    let ctx = EventContext::from_pairs([
        ("WHAT", "SERVICE"),
        ("NOTIFICATIONTYPE", "ACKNOWLEDGEMENT"),
        ("SERVICESHORTSTATE", "CRIT"),
        ("SERVICEACKAUTHOR", "jane"),
    ]);
    let body = template::compose_text(&ctx).unwrap();
    assert!(body.contains("Acknowledged (CRIT) by jane"));
    assert!(body.contains("Comment:"));
}

#[test]
fn unknown_notification_type_passes_through_verbatim() {
    let ctx = EventContext::from_pairs([("WHAT", "HOST"), ("NOTIFICATIONTYPE", "SOMETHINGNEW")]);
    let body = template::compose_text(&ctx).unwrap();
    assert!(body.contains("Event:    SOMETHINGNEW"));
}

#[test]
fn substitute_replaces_known_and_strips_unknown_placeholders() {
    let ctx = EventContext::from_pairs([("HOSTNAME", "srv1")]);
    let out = template::substitute("$HOSTNAME$ / $NOT_SET$!", &ctx);
    assert_eq!(out, "srv1 / !");
}

// ── Wire format ──

#[test]
fn message_serializes_with_exact_field_names_and_timestamp_format() {
    let mut message = OutboundMessage::new(fixed_now());
    message.text = "hello".to_string();
    message.priority = Priority::Alert;
    message.addressing_mode = AddressingMode::UserAndComputer;
    message.recipient = vec![r"note\homer.simpson".to_string()];

    let value = serde_json::to_value(&message).unwrap();
    let obj = value.as_object().unwrap();
    for field in [
        "TEXT",
        "STARTTIMEUTC",
        "ENDTIMEUTC",
        "LINKTARGET",
        "LINKTEXT",
        "NETWORKRANGEIDS",
        "PRIORITY",
        "NOTIFYRECEIVE",
        "NOTIFYACKNOWLEDGE",
        "OPTNODELIVERYIFREVACK",
        "OPTNODELIVERYIFACKONOTHERCOMP",
        "OPTNODELIVERYIFLOGGEDINAFTERMSGSTART",
        "SHOWPOPUP",
        "SHOWTICKER",
        "SHOWFULLSCREEN",
        "SHOWFULLSCREENANDLOCK",
        "SHOWLINKMAXIMIZED",
        "ADDRESSINGMODE",
        "SHOWONWINLOGON",
        "SHOWONWINLOGONONLY",
        "HOMEOFFICEUSERSEXCLUDE",
        "HOMEOFFICEUSERSONLY",
        "RECIPIENT",
        "EXCLUDE",
        "NETWORKRANGEEXCLUDE",
        "PUSH",
    ] {
        assert!(obj.contains_key(field), "missing field {field}");
    }
    assert_eq!(obj.len(), 26);
    assert_eq!(obj["STARTTIMEUTC"], "2024-05-01T12:00:00");
    assert_eq!(obj["PRIORITY"], 2);
    assert_eq!(obj["ADDRESSINGMODE"], 0x1000);
    assert_eq!(obj["RECIPIENT"][0], r"note\homer.simpson");
}

// ── Dispatcher ──

#[test]
fn messages_endpoint_is_appended_to_the_base_url() {
    let client = ApiClient::new(
        "https://inote.example.com/IDERInote/api",
        "user",
        "secret",
        false,
    )
    .unwrap();
    assert_eq!(
        client.messages_url(),
        "https://inote.example.com/IDERInote/api/v1/messages"
    );
}

#[test]
fn delivery_failures_are_retryable_input_errors_are_not() {
    let api = NotifyError::Api {
        status: 503,
        body: "maintenance".to_string(),
    };
    assert!(api.is_retryable());
    assert!(api.to_string().contains("503"));

    assert!(!NotifyError::MissingContext("WHAT".to_string()).is_retryable());
    assert!(!NotifyError::InvalidDuration("x".to_string()).is_retryable());
    assert!(!NotifyError::UnknownAddressingMode("x".to_string()).is_retryable());
}

// ── Form schema ──

#[test]
fn form_schema_lists_every_parameter_in_ui_order() {
    let spec = form::parameter_form();
    let keys: Vec<&str> = spec.elements.iter().map(|e| e.key).collect();
    assert_eq!(keys.first(), Some(&"inote_api_url"));
    assert_eq!(keys.last(), Some(&"inote_plugin_loglevel"));
    assert!(keys.contains(&"inote_msg_popup_or_fs"));
    assert!(spec.optional_keys.contains(&"checkmkUrl"));
}

#[test]
fn form_schema_serializes_with_type_tags() {
    let value = serde_json::to_value(form::parameter_form()).unwrap();
    let elements = value["elements"].as_array().unwrap();
    assert_eq!(elements[0]["type"], "url");
    let loglevel = elements.last().unwrap();
    assert_eq!(loglevel["type"], "dropdown");
    assert_eq!(loglevel["choices"][3][0], "8");
}
