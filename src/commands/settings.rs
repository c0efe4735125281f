use crate::app::AppState;
use crate::models::Settings;

pub fn get_settings(state: &AppState) -> Settings {
    state.settings.clone()
}
