//! Application state and event handling.
//!
//! [`App`] owns the reducer [`ListState`], the create/edit form, and the
//! focus/selection bookkeeping. Key events mutate local state and may
//! produce a [`NetCommand`] for the caller to dispatch; server outcomes
//! come back through [`App::apply_action`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_proto::patch::TaskPatch;
use taskdeck_proto::task::NewTask;

use crate::net::NetCommand;
use crate::state::{Action, ListState};

/// Which part of the screen receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The task list (default).
    List,
    /// The form's task text field.
    TaskField,
    /// The form's description field.
    DescriptionField,
    /// The form's priority field.
    PriorityField,
}

/// The create/edit form: three text inputs plus the edit marker.
#[derive(Debug, Clone, Default)]
pub struct Form {
    /// To-do text input.
    pub task: String,
    /// Description input.
    pub description: String,
    /// Priority input, parsed on submit; empty means "use the default".
    pub priority: String,
    /// Byte offset of the cursor within the focused field.
    pub cursor: usize,
    /// `Some(position)` when editing the task at that list position;
    /// `None` when the form creates a new task.
    pub edit_index: Option<usize>,
}

impl Form {
    /// Resets every field and leaves create-mode.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Main application state.
pub struct App {
    /// The mirrored task list.
    pub state: ListState,
    /// The create/edit form.
    pub form: Form,
    /// Which panel is focused.
    pub focus: Focus,
    /// Selected row in the task list.
    pub selected: usize,
    /// True between submitting the form and the server's reply; used to
    /// clear the form only for its own success, not for toggle updates.
    pending_submit: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an app awaiting its first list load.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ListState::new(),
            form: Form {
                task: String::new(),
                description: String::new(),
                priority: String::new(),
                cursor: 0,
                edit_index: None,
            },
            focus: Focus::List,
            selected: 0,
            pending_submit: false,
            should_quit: false,
        }
    }

    /// Applies a completed server interaction to the mirror.
    ///
    /// Clears the form after its own create/update round-trips and keeps
    /// the list selection within bounds.
    pub fn apply_action(&mut self, action: Action) {
        let was_submit = self.pending_submit
            && matches!(action, Action::Created(_) | Action::Updated(_));
        if matches!(
            action,
            Action::Created(_) | Action::Updated(_) | Action::Deleted(_) | Action::Failed(_)
        ) {
            self.pending_submit = false;
        }

        self.state.apply(action);

        if was_submit {
            self.form.clear();
            self.focus = Focus::List;
        }
        if self.selected >= self.state.tasks.len() {
            self.selected = self.state.tasks.len().saturating_sub(1);
        }
    }

    /// Handles a key event, possibly producing a command to dispatch.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<NetCommand> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Esc, _) => {
                // Esc leaves the form first; from the list it quits.
                if self.focus == Focus::List {
                    self.should_quit = true;
                } else {
                    self.form.clear();
                    self.focus = Focus::List;
                }
                return None;
            }
            (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.cycle_focus_backward();
                return None;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.cycle_focus_forward();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::TaskField | Focus::DescriptionField | Focus::PriorityField => {
                self.handle_form_key(key)
            }
        }
    }

    /// Key handling while the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.state.tasks.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char(' ' | 'c') => self.toggle_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('e') => {
                self.edit_selected();
                None
            }
            KeyCode::Char('n') => {
                self.form.clear();
                self.focus = Focus::TaskField;
                None
            }
            KeyCode::Char('r') => Some(NetCommand::Refresh),
            _ => None,
        }
    }

    /// Key handling while a form field is focused.
    fn handle_form_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        match key.code {
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => {
                let cursor = self.form.cursor.min(self.form_field_len());
                if let Some(field) = self.focused_field_mut() {
                    field.insert(cursor, c);
                    self.form.cursor = cursor + c.len_utf8();
                }
                None
            }
            KeyCode::Backspace => {
                self.delete_char_before_cursor();
                None
            }
            KeyCode::Left => {
                self.move_cursor_left();
                None
            }
            KeyCode::Right => {
                self.move_cursor_right();
                None
            }
            KeyCode::Home => {
                self.form.cursor = 0;
                None
            }
            KeyCode::End => {
                self.form.cursor = self.form_field_len();
                None
            }
            _ => None,
        }
    }

    /// Flips the selected task's completion flag. The flag is sent
    /// explicitly, so un-completing a task works the same as completing it.
    fn toggle_selected(&self) -> Option<NetCommand> {
        let task = self.state.tasks.get(self.selected)?;
        Some(NetCommand::Update(
            task.id,
            TaskPatch::completed(!task.completed),
        ))
    }

    /// Requests deletion of the selected task.
    fn delete_selected(&self) -> Option<NetCommand> {
        let task = self.state.tasks.get(self.selected)?;
        Some(NetCommand::Delete(task.id))
    }

    /// Loads the selected task into the form for editing.
    fn edit_selected(&mut self) {
        let Some(task) = self.state.tasks.get(self.selected) else {
            return;
        };
        self.form.task.clone_from(&task.task);
        self.form.description.clone_from(&task.description);
        self.form.priority = task.priority.to_string();
        self.form.edit_index = Some(self.selected);
        self.form.cursor = self.form.task.len();
        self.focus = Focus::TaskField;
    }

    /// Submits the form: create when `edit_index` is unset, update when set.
    ///
    /// Local validation failures surface in the error banner without any
    /// request being made.
    fn submit_form(&mut self) -> Option<NetCommand> {
        let priority = match self.parse_priority() {
            Ok(p) => p,
            Err(message) => {
                self.state.error = Some(message);
                return None;
            }
        };

        if let Some(index) = self.form.edit_index {
            let task = self.state.tasks.get(index)?;
            let patch = TaskPatch {
                task: Some(self.form.task.clone()),
                description: Some(self.form.description.clone()),
                priority,
                completed: None,
            };
            if let Err(e) = patch.validate() {
                self.state.error = Some(e.to_string());
                return None;
            }
            self.pending_submit = true;
            Some(NetCommand::Update(task.id, patch))
        } else {
            let input = NewTask {
                task: self.form.task.clone(),
                description: Some(self.form.description.clone()),
                priority,
                completed: None,
            };
            if let Err(e) = input.validate() {
                self.state.error = Some(e.to_string());
                return None;
            }
            self.pending_submit = true;
            Some(NetCommand::Create(input))
        }
    }

    /// Parses the priority input; empty means "not specified".
    fn parse_priority(&self) -> Result<Option<u8>, String> {
        let raw = self.form.priority.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<u8>()
            .map(Some)
            .map_err(|_| format!("priority must be a number, got {raw:?}"))
    }

    /// Cycle focus forward: List -> Task -> Description -> Priority -> List.
    fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            Focus::List => Focus::TaskField,
            Focus::TaskField => Focus::DescriptionField,
            Focus::DescriptionField => Focus::PriorityField,
            Focus::PriorityField => Focus::List,
        };
        self.form.cursor = self.form_field_len();
    }

    /// Cycle focus backward.
    fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            Focus::List => Focus::PriorityField,
            Focus::TaskField => Focus::List,
            Focus::DescriptionField => Focus::TaskField,
            Focus::PriorityField => Focus::DescriptionField,
        };
        self.form.cursor = self.form_field_len();
    }

    /// The focused form field, if a form field is focused.
    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::List => None,
            Focus::TaskField => Some(&mut self.form.task),
            Focus::DescriptionField => Some(&mut self.form.description),
            Focus::PriorityField => Some(&mut self.form.priority),
        }
    }

    /// Byte length of the focused field (0 while the list is focused).
    fn form_field_len(&self) -> usize {
        match self.focus {
            Focus::List => 0,
            Focus::TaskField => self.form.task.len(),
            Focus::DescriptionField => self.form.description.len(),
            Focus::PriorityField => self.form.priority.len(),
        }
    }

    /// Deletes the character before the cursor in the focused field.
    fn delete_char_before_cursor(&mut self) {
        let cursor = self.form.cursor;
        let Some(field) = self.focused_field_mut() else {
            return;
        };
        let Some((offset, _)) = field[..cursor.min(field.len())].char_indices().next_back() else {
            return;
        };
        field.remove(offset);
        self.form.cursor = offset;
    }

    /// Moves the cursor one character left.
    fn move_cursor_left(&mut self) {
        let len = self.form_field_len();
        let cursor = self.form.cursor.min(len);
        let field = match self.focus {
            Focus::List => return,
            Focus::TaskField => &self.form.task,
            Focus::DescriptionField => &self.form.description,
            Focus::PriorityField => &self.form.priority,
        };
        if let Some((offset, _)) = field[..cursor].char_indices().next_back() {
            self.form.cursor = offset;
        }
    }

    /// Moves the cursor one character right.
    fn move_cursor_right(&mut self) {
        let field = match self.focus {
            Focus::List => return,
            Focus::TaskField => &self.form.task,
            Focus::DescriptionField => &self.form.description,
            Focus::PriorityField => &self.form.priority,
        };
        let cursor = self.form.cursor.min(field.len());
        if let Some(c) = field[cursor..].chars().next() {
            self.form.cursor = cursor + c.len_utf8();
        }
    }
}
