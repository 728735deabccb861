use rmpv::Value;

use crate::protocol::ProtocolVersion;

/// Per-torrent options sent with add and set-options calls.
///
/// Only fields that are set are sent; the daemon keeps its defaults for the rest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    pub max_connections: Option<i64>,
    pub max_upload_slots: Option<i64>,
    pub max_upload_speed: Option<i64>,
    pub max_download_speed: Option<i64>,
    pub prioritize_first_last_pieces: Option<bool>,
    /// Sent as the inverted `compact_allocation` flag to legacy daemons.
    pub pre_allocate_storage: Option<bool>,
    pub download_location: Option<String>,
    pub auto_managed: Option<bool>,
    pub stop_at_ratio: Option<bool>,
    pub stop_ratio: Option<f32>,
    pub remove_at_ratio: Option<bool>,
    pub move_completed: Option<bool>,
    pub move_completed_path: Option<String>,
    pub add_paused: Option<bool>,
    pub v2: V2Options,
}

/// Options only understood by newer daemons; dropped for legacy ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct V2Options {
    pub sequential_download: Option<bool>,
    pub shared: Option<bool>,
}

impl Options {
    pub fn to_dictionary(&self, protocol: ProtocolVersion) -> Value {
        let mut entries = Vec::new();
        push_int(&mut entries, "max_connections", self.max_connections);
        push_int(&mut entries, "max_upload_slots", self.max_upload_slots);
        push_int(&mut entries, "max_upload_speed", self.max_upload_speed);
        push_int(&mut entries, "max_download_speed", self.max_download_speed);
        push_bool(&mut entries, "prioritize_first_last_pieces", self.prioritize_first_last_pieces);
        if let Some(pre_allocate) = self.pre_allocate_storage {
            match protocol {
                ProtocolVersion::V2 => {
                    push_bool(&mut entries, "pre_allocate_storage", Some(pre_allocate))
                }
                ProtocolVersion::V1 => {
                    push_bool(&mut entries, "compact_allocation", Some(!pre_allocate))
                }
            }
        }
        push_text(&mut entries, "download_location", self.download_location.as_deref());
        push_bool(&mut entries, "auto_managed", self.auto_managed);
        push_bool(&mut entries, "stop_at_ratio", self.stop_at_ratio);
        if let Some(ratio) = self.stop_ratio {
            entries.push((Value::from("stop_ratio"), Value::F32(ratio)));
        }
        push_bool(&mut entries, "remove_at_ratio", self.remove_at_ratio);
        push_bool(&mut entries, "move_completed", self.move_completed);
        push_text(&mut entries, "move_completed_path", self.move_completed_path.as_deref());
        push_bool(&mut entries, "add_paused", self.add_paused);
        if protocol == ProtocolVersion::V2 {
            push_bool(&mut entries, "sequential_download", self.v2.sequential_download);
            push_bool(&mut entries, "shared", self.v2.shared);
        }
        Value::Map(entries)
    }
}

/// Serialises optional options; `None` becomes an empty dictionary.
pub fn options_dictionary(options: Option<&Options>, protocol: ProtocolVersion) -> Value {
    options.map(|options| options.to_dictionary(protocol)).unwrap_or(Value::Map(Vec::new()))
}

fn push_int(entries: &mut Vec<(Value, Value)>, key: &str, value: Option<i64>) {
    if let Some(value) = value {
        entries.push((Value::from(key), Value::from(value)));
    }
}

fn push_bool(entries: &mut Vec<(Value, Value)>, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        entries.push((Value::from(key), Value::from(value)));
    }
}

fn push_text(entries: &mut Vec<(Value, Value)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        entries.push((Value::from(key), Value::from(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(value: &Value) -> Vec<String> {
        let Value::Map(entries) = value else {
            panic!("options must serialise to a dictionary");
        };
        entries.iter().filter_map(|(key, _)| key.as_str().map(str::to_owned)).collect()
    }

    fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
        let Value::Map(entries) = value else {
            return None;
        };
        entries.iter().find(|(k, _)| k.as_str() == Some(key)).map(|(_, v)| v)
    }

    #[test]
    fn unset_options_serialise_to_empty_dictionary() {
        assert_eq!(options_dictionary(None, ProtocolVersion::V2), Value::Map(Vec::new()));
        assert!(keys(&Options::default().to_dictionary(ProtocolVersion::V1)).is_empty());
    }

    #[test]
    fn legacy_daemons_get_inverted_compact_allocation() {
        let options = Options { pre_allocate_storage: Some(true), ..Options::default() };
        let legacy = options.to_dictionary(ProtocolVersion::V1);
        assert_eq!(lookup(&legacy, "compact_allocation"), Some(&Value::from(false)));
        assert!(lookup(&legacy, "pre_allocate_storage").is_none());

        let current = options.to_dictionary(ProtocolVersion::V2);
        assert_eq!(lookup(&current, "pre_allocate_storage"), Some(&Value::from(true)));
    }

    #[test]
    fn v2_only_options_are_dropped_for_legacy_daemons() {
        let options = Options {
            add_paused: Some(true),
            v2: V2Options { sequential_download: Some(true), shared: Some(false) },
            ..Options::default()
        };
        assert_eq!(keys(&options.to_dictionary(ProtocolVersion::V1)), vec!["add_paused"]);
        assert_eq!(
            keys(&options.to_dictionary(ProtocolVersion::V2)),
            vec!["add_paused", "sequential_download", "shared"]
        );
    }

    #[test]
    fn paths_and_limits_are_forwarded() {
        let options = Options {
            max_download_speed: Some(512),
            download_location: Some("/srv/downloads".to_owned()),
            stop_ratio: Some(2.0),
            ..Options::default()
        };
        let dict = options.to_dictionary(ProtocolVersion::V2);
        assert_eq!(lookup(&dict, "max_download_speed"), Some(&Value::from(512)));
        assert_eq!(lookup(&dict, "download_location"), Some(&Value::from("/srv/downloads")));
        assert_eq!(lookup(&dict, "stop_ratio"), Some(&Value::F32(2.0)));
    }
}
