use serde::{Deserialize, Serialize};

pub(crate) const SETTINGS_VERSION: u32 = 1;
const SETTINGS_KEY: &str = "bd.settings.v1";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum ViewMode {
    #[default]
    Gallery,
    Calendar,
}

impl ViewMode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            ViewMode::Gallery => ViewMode::Calendar,
            ViewMode::Calendar => ViewMode::Gallery,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ViewMode::Gallery => "gallery",
            ViewMode::Calendar => "calendar",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct SettingsBlob {
    pub(crate) version: u32,
    pub(crate) view_mode: ViewMode,
}

impl Default for SettingsBlob {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            view_mode: ViewMode::default(),
        }
    }
}

pub(crate) fn load_view_mode() -> ViewMode {
    load_settings_blob().view_mode
}

pub(crate) fn persist_view_mode(view_mode: ViewMode) {
    let mut blob = load_settings_blob();
    blob.view_mode = view_mode;
    save_settings_blob(&blob);
}

fn load_settings_blob() -> SettingsBlob {
    let Some(storage) = local_storage() else {
        return SettingsBlob::default();
    };
    let Ok(Some(raw)) = storage.get_item(SETTINGS_KEY) else {
        return SettingsBlob::default();
    };
    match serde_json::from_str::<SettingsBlob>(&raw) {
        Ok(blob) if blob.version == SETTINGS_VERSION => blob,
        _ => SettingsBlob::default(),
    }
}

fn save_settings_blob(blob: &SettingsBlob) {
    let Some(storage) = local_storage() else {
        return;
    };
    let Ok(raw) = serde_json::to_string(blob) else {
        return;
    };
    let _ = storage.set_item(SETTINGS_KEY, &raw);
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn clear_saved_settings() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(SETTINGS_KEY);
        }
    }

    #[wasm_bindgen_test]
    fn default_view_mode_is_gallery() {
        clear_saved_settings();
        assert_eq!(load_view_mode(), ViewMode::Gallery);
    }

    #[wasm_bindgen_test]
    fn persisted_view_mode_round_trips() {
        clear_saved_settings();
        persist_view_mode(ViewMode::Calendar);
        assert_eq!(load_view_mode(), ViewMode::Calendar);
        persist_view_mode(ViewMode::Gallery);
        assert_eq!(load_view_mode(), ViewMode::Gallery);
        clear_saved_settings();
    }

    #[wasm_bindgen_test]
    fn unknown_blob_falls_back_to_default() {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(SETTINGS_KEY, "{\"version\":99,\"view_mode\":\"Spiral\"}");
        }
        assert_eq!(load_view_mode(), ViewMode::Gallery);
        clear_saved_settings();
    }
}
