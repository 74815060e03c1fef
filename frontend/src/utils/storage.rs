use web_sys::window;

/// The slice of the Web Storage API the lead flow relies on.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
}

pub struct BrowserStorage(web_sys::Storage);

impl BrowserStorage {
    pub fn local() -> Option<Self> {
        window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(Self)
    }

    pub fn session() -> Option<Self> {
        window()
            .and_then(|w| w.session_storage().ok())
            .flatten()
            .map(Self)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.0
            .set_item(key, value)
            .map_err(|e| format!("{:?}", e))
    }
}
