//! Application state shared by the runtime and the components.

use rat_focus::{Focus, FocusBuilder};

use crate::ui::components::key_entry::KeyEntryForm;
use crate::ui::theme::{LoadedTheme, Theme, ThemeId};

/// Everything the key entry screen needs to render and react to input.
pub struct App<'a> {
    pub form: KeyEntryForm<'a>,
    pub focus: Focus,
    pub theme: Box<dyn Theme>,
    pub theme_id: ThemeId,
}

impl<'a> App<'a> {
    /// Build the app with the key field focused.
    pub fn new(form: KeyEntryForm<'a>, theme: LoadedTheme) -> Self {
        let focus = FocusBuilder::build_for(form.state());
        focus.focus(&form.state().f_input);
        Self {
            form,
            focus,
            theme: theme.theme,
            theme_id: theme.id,
        }
    }

    pub fn input_focused(&self) -> bool {
        self.form.state().f_input.get()
    }

    pub fn submit_focused(&self) -> bool {
        self.form.state().f_submit.get()
    }

    pub fn focus_input(&self) {
        self.focus.focus(&self.form.state().f_input);
    }
}
