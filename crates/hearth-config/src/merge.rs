/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Whether the dotted `path` (e.g. `"logging.level"`) is present in `value`.
#[must_use]
pub fn contains_path(value: &toml::Value, path: &str) -> bool {
    let mut current = value;
    for segment in path.split('.') {
        match current.as_table().and_then(|t| t.get(segment)) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

/// Set the dotted `path` in `value`, creating intermediate tables.
///
/// Non-table intermediates are replaced by tables.
pub fn set_path(value: &mut toml::Value, path: &str, leaf: toml::Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = value;
    for segment in segments {
        if !current.is_table() {
            *current = toml::Value::Table(toml::map::Map::new());
        }
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment.to_owned())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    if !current.is_table() {
        *current = toml::Value::Table(toml::map::Map::new());
    }
    if let Some(table) = current.as_table_mut() {
        table.insert(last.to_owned(), leaf);
    }
}
