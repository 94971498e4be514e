//! # Actions
//!
//! Everything that can happen in tolk becomes an `Action`.
//! User presses the translate button? That's `Action::TranslateButtonPressed`.
//! The service answers? That's `Action::TranslationReceived(translation)`.
//!
//! The `update()` function takes the current session and an action,
//! mutates the session, and returns the `Effect` the event loop must run.
//! No I/O here.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::{Session, ViewId};
use crate::deepl::{Formality, Language, TranslateParams, Translation};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Buttons on the main screen
    SourceLanguageButtonPressed,
    TargetLanguageButtonPressed,
    FormalityButtonPressed,
    TranslateButtonPressed,

    // Pickers
    SourceLanguageSelected(Language),
    TargetLanguageSelected(Language),
    FormalitySelected(Formality),
    PickerDismissed,

    // Text widgets
    SourceTextChanged(String),
    InsertModeEntered,
    InsertModeExited,

    // Service round trips
    LanguagesRequested,
    LanguagesReceived,
    TranslationReceived(Translation),

    // Login
    ApiKeyEntered(String),

    // Host
    ContentResized { width: u16, height: u16 },
    ToggleHelp,
    Error(String),
    ErrorDismissed,
    Quit,
}

/// Side effects requested by `update`, executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchLanguages,
    Translate(TranslateParams),
    SaveApiKey(String),
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::SourceLanguageButtonPressed => {
            session.view = ViewId::SourceLanguage;
            Effect::None
        }
        Action::TargetLanguageButtonPressed => {
            session.view = ViewId::TargetLanguage;
            Effect::None
        }
        Action::FormalityButtonPressed => {
            session.view = ViewId::Formality;
            Effect::None
        }
        Action::TranslateButtonPressed => request_translation(session),

        Action::SourceLanguageSelected(language) => {
            info!("Source language selected: {}", language.language);
            session.source_language = Some(language);
            session.view = ViewId::Main;
            Effect::None
        }
        Action::TargetLanguageSelected(language) => {
            info!("Target language selected: {}", language.language);
            session.target_language = Some(language);
            session.view = ViewId::Main;
            Effect::None
        }
        Action::FormalitySelected(formality) => {
            session.formality = formality;
            if !session.formality_applies() {
                session.status_message =
                    format!("Formality '{}' is ignored for this target language", formality.label());
            }
            session.view = ViewId::Main;
            Effect::None
        }
        Action::PickerDismissed => {
            session.view = ViewId::Main;
            Effect::None
        }

        Action::SourceTextChanged(text) => {
            session.source_text = text;
            Effect::None
        }
        Action::InsertModeEntered => {
            session.insert_mode = true;
            Effect::None
        }
        Action::InsertModeExited => {
            session.insert_mode = false;
            Effect::None
        }

        Action::LanguagesRequested => {
            if session.languages.is_loaded() || session.languages_pending {
                return Effect::None;
            }
            session.languages_pending = true;
            session.is_loading = true;
            Effect::FetchLanguages
        }
        Action::LanguagesReceived => {
            session.languages_pending = false;
            session.is_loading = false;
            resolve_configured_languages(session);
            Effect::None
        }
        Action::TranslationReceived(translation) => {
            session.is_loading = false;
            session.status_message = match (&session.source_language, &translation.detected_source_language) {
                (None, Some(detected)) => format!("Translated (detected {detected})"),
                _ => "Translated".to_string(),
            };
            session.translation = Some(translation);
            Effect::None
        }

        Action::ApiKeyEntered(key) => {
            let key = key.trim().to_string();
            if key.is_empty() {
                session.status_message = "API key must not be empty".to_string();
                return Effect::None;
            }
            session.has_api_key = true;
            session.insert_mode = false;
            session.view = ViewId::Main;
            Effect::SaveApiKey(key)
        }

        Action::ContentResized { width, height } => {
            session.content_width = width;
            session.content_height = height;
            Effect::None
        }
        Action::ToggleHelp => {
            session.show_full_help = !session.show_full_help;
            Effect::None
        }
        Action::Error(message) => {
            warn!("Error surfaced to user: {}", message);
            session.is_loading = false;
            session.languages_pending = false;
            session.insert_mode = false;
            session.error = Some(message);
            session.view = ViewId::Error;
            Effect::None
        }
        Action::ErrorDismissed => {
            session.error = None;
            session.view = if session.has_api_key {
                ViewId::Main
            } else {
                ViewId::Login
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn request_translation(session: &mut Session) -> Effect {
    if session.is_loading {
        debug!("Translate pressed while a request is in flight, ignoring");
        return Effect::None;
    }
    if !session.has_api_key {
        return update(session, Action::Error("no API key set".to_string()));
    }
    let Some(target) = session.target_language.as_ref() else {
        return update(
            session,
            Action::Error("no target language selected".to_string()),
        );
    };
    if session.source_text.trim().is_empty() {
        session.status_message = "Nothing to translate".to_string();
        return Effect::None;
    }

    let params = TranslateParams {
        text: vec![session.source_text.clone()],
        source_lang: session.source_language.as_ref().map(|l| l.language.clone()),
        target_lang: target.language.clone(),
        formality: session.formality_applies().then_some(session.formality),
    };

    session.is_loading = true;
    session.status_message = "Translating...".to_string();
    Effect::Translate(params)
}

/// Languages given as bare codes (config, CLI) get their full entry once the lists arrive.
fn resolve_configured_languages(session: &mut Session) {
    fn resolve(current: &mut Option<Language>, list: Option<Vec<Language>>) {
        let (Some(lang), Some(list)) = (current.as_mut(), list) else {
            return;
        };
        if let Some(found) = list
            .into_iter()
            .find(|l| l.language.eq_ignore_ascii_case(&lang.language))
        {
            *lang = found;
        }
    }

    resolve(&mut session.source_language, session.languages.source());
    resolve(&mut session.target_language, session.languages.target());
}
