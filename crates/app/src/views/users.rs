//! User management screen.
//!
//! [`UsersState`] is the plain view state (table, selection, edit buffer,
//! sorting, paging) and has no I/O. [`UsersView`] drives it against the
//! `/users` resource and reports failures through the [`Notifier`].

use std::sync::{Mutex, MutexGuard};

use qwenht_client::{ChangePasswordRequest, ClientError};
use qwenht_core::{PageRequest, PaginatedResponse, SortDirection, SortState, User, UserId};

use crate::{AppContext, Notifier};

/// Rows per page. The screen offers no other size.
pub const PAGE_SIZE: u32 = 5;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Sortable columns: (wire field, header label).
pub const COLUMNS: [(&str, &str); 4] = [
    ("email", "Email"),
    ("firstName", "First Name"),
    ("lastName", "Last Name"),
    ("roles", "Roles"),
];

pub const LOAD_FAILED: &str = "Error loading users. Please try again later.";
pub const SELECT_TO_EDIT: &str = "Please select a user to edit";
pub const SELECT_TO_DELETE: &str = "Please select a user to delete";
pub const SELECT_TO_CHANGE_PASSWORD: &str = "Please select a user to change password";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this user?";
pub const DELETE_FAILED: &str = "Error deleting user";
pub const UPDATE_FAILED: &str = "Error updating user";
pub const CREATE_FAILED: &str = "Error creating user";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const CONFIRM_PASSWORD: &str = "Confirm new password:";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match";

/// Editable fields of the detail form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            roles: user.roles.clone(),
        }
    }

    /// Same rules the form enforces before Save is enabled.
    pub fn validate(&self) -> Result<(), String> {
        self.apply_to(&User::default())
            .validate()
            .map_err(|e| e.to_string())
    }

    /// The form's fields laid over `base`; everything else comes from `base`.
    pub fn apply_to(&self, base: &User) -> User {
        User {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            roles: self.roles.clone(),
            ..base.clone()
        }
    }

    /// Comma separated role input, as typed in a text box.
    pub fn set_roles_from_text(&mut self, text: &str) {
        self.roles = text
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();
    }
}

/// What Save should do with the current form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePlan {
    /// Not in add/edit mode; the form is read-only.
    Idle,
    Invalid(String),
    Create(User),
    Update(UserId, User),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub total_users: u64,
    /// 0-based; the API is sent `current_page + 1`.
    pub current_page: u32,
    pub page_size: u32,
    pub sort: SortState,
    pub search_term: String,
    pub form: UserForm,
    pub is_editing: bool,
    /// Row highlighted in the table.
    pub selected: Option<User>,
    /// Edit buffer: the record Save merges the form onto.
    pub current: Option<User>,
    pub is_admin: bool,
}

impl Default for UsersState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl UsersState {
    pub fn new(is_admin: bool) -> Self {
        Self {
            users: Vec::new(),
            total_users: 0,
            current_page: 0,
            page_size: PAGE_SIZE,
            sort: SortState::unsorted(),
            search_term: String::new(),
            form: UserForm::default(),
            is_editing: false,
            selected: None,
            current: None,
            is_admin,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.current_page + 1, self.page_size)
            .sorted(self.sort.clone())
            .search(self.search_term.clone())
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        self.total_users.div_ceil(size) as u32
    }

    /// Replace the table with a fresh page and select its first row.
    pub fn apply_page(&mut self, page: PaginatedResponse<User>) {
        self.users = page.data;
        self.total_users = page.total_count;
        match self.users.first().cloned() {
            Some(first) => self.select_user(first),
            None => self.clear_selection(),
        }
    }

    pub fn apply_load_error(&mut self) {
        self.users.clear();
        self.total_users = 0;
        self.clear_selection();
    }

    /// Click on a row. Ignored while a form is open.
    pub fn select(&mut self, index: usize) -> bool {
        match self.users.get(index).cloned() {
            Some(user) if !self.is_editing => {
                self.select_user(user);
                true
            }
            _ => false,
        }
    }

    fn select_user(&mut self, user: User) {
        if self.is_editing {
            return;
        }
        self.form = UserForm::from_user(&user);
        self.current = Some(user.clone());
        self.selected = Some(user);
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.current = None;
        self.form = UserForm::default();
    }

    pub fn is_selected(&self, user: &User) -> bool {
        self.selected.as_ref().is_some_and(|s| s.id == user.id)
    }

    /// Header click. Always goes back to the first page.
    pub fn sort_by(&mut self, field: &str) {
        self.sort.toggle(field);
        self.current_page = 0;
    }

    pub fn sort_indicator(&self, field: &str) -> &'static str {
        if self.sort.field() != Some(field) {
            return "";
        }
        match self.sort.direction() {
            Some(SortDirection::Asc) => "▲",
            Some(SortDirection::Desc) => "▼",
            None => "",
        }
    }

    pub fn change_page(&mut self, index: u32, size: u32) {
        self.current_page = index;
        self.page_size = size.max(1);
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
        self.current_page = 0;
    }

    pub fn start_add(&mut self) {
        self.is_editing = true;
        self.clear_selection();
    }

    pub fn start_edit(&mut self) -> Result<(), &'static str> {
        let user = self.selected.clone().ok_or(SELECT_TO_EDIT)?;
        self.is_editing = true;
        self.form = UserForm::from_user(&user);
        self.current = Some(user);
        Ok(())
    }

    pub fn delete_target(&self) -> Result<UserId, &'static str> {
        self.selected
            .as_ref()
            .and_then(|u| u.id.clone())
            .ok_or(SELECT_TO_DELETE)
    }

    pub fn save_plan(&self) -> SavePlan {
        if !self.is_editing {
            return SavePlan::Idle;
        }
        if let Err(message) = self.form.validate() {
            return SavePlan::Invalid(message);
        }
        match &self.current {
            Some(buffer) => match &buffer.id {
                Some(id) => SavePlan::Update(id.clone(), self.form.apply_to(buffer)),
                None => SavePlan::Create(self.form.apply_to(buffer)),
            },
            None => SavePlan::Create(self.form.apply_to(&User {
                is_active: true,
                ..User::default()
            })),
        }
    }

    pub fn finish_save(&mut self) {
        self.is_editing = false;
        self.current = None;
    }

    pub fn cancel(&mut self) {
        self.is_editing = false;
        self.current = None;
        self.form = UserForm::default();
    }

    pub fn password_target(&self) -> Result<User, &'static str> {
        self.selected.clone().ok_or(SELECT_TO_CHANGE_PASSWORD)
    }
}

/// First prompt shown when changing a password.
pub fn new_password_prompt(user: &User) -> String {
    format!("Enter new password for {}:", user.full_name())
}

/// Checks run between the two password prompts.
pub fn check_new_password(new_password: &str) -> Result<(), &'static str> {
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    Ok(())
}

/// The screen, wired to the API.
///
/// Every action is one awaited call; nothing de-duplicates overlapping
/// actions, and the state lock is never held across an `.await`.
pub struct UsersView {
    ctx: AppContext,
    state: Mutex<UsersState>,
}

impl UsersView {
    pub fn new(ctx: AppContext) -> Self {
        let state = UsersState::new(ctx.is_admin());
        Self {
            ctx,
            state: Mutex::new(state),
        }
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> UsersState {
        self.state().clone()
    }

    /// Mutate the view state directly (form input, row clicks).
    pub fn update<R>(&self, f: impl FnOnce(&mut UsersState) -> R) -> R {
        f(&mut self.state())
    }

    fn state(&self) -> MutexGuard<'_, UsersState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn notifier(&self) -> &dyn Notifier {
        self.ctx.notifier.as_ref()
    }

    /// Fetch the current page. On failure the table is emptied and an alert shown.
    pub async fn load(&self) {
        if self.try_load().await.is_err() {
            self.notifier().alert(LOAD_FAILED);
        }
    }

    /// [`load`](Self::load) without the alert; the error is handed back.
    pub async fn try_load(&self) -> Result<(), ClientError> {
        let request = self.state().page_request();
        self.ctx.progress.show();
        let result = self.ctx.users.paginated(&request).await;
        self.ctx.progress.hide();

        match result {
            Ok(page) => {
                tracing::debug!(page = request.page, rows = page.data.len(), "users loaded");
                self.state().apply_page(page);
                Ok(())
            }
            Err(err) => {
                tracing::error!("error loading users: {err}");
                self.state().apply_load_error();
                Err(err)
            }
        }
    }

    pub async fn sort(&self, field: &str) {
        self.state().sort_by(field);
        self.load().await;
    }

    pub async fn change_page(&self, index: u32, size: u32) {
        self.state().change_page(index, size);
        self.load().await;
    }

    pub async fn search(&self, term: &str) {
        self.state().set_search(term);
        self.load().await;
    }

    pub async fn clear_search(&self) {
        self.search("").await;
    }

    pub fn select(&self, index: usize) -> bool {
        self.state().select(index)
    }

    pub fn add(&self) {
        self.state().start_add();
    }

    pub fn edit(&self) {
        let started = self.state().start_edit();
        if let Err(message) = started {
            self.notifier().alert(message);
        }
    }

    /// Create or update from the form, then reload the page.
    pub async fn save(&self) {
        let plan = self.state().save_plan();
        let (email, result) = match plan {
            SavePlan::Idle => return,
            SavePlan::Invalid(reason) => {
                tracing::debug!("form rejected: {reason}");
                return;
            }
            SavePlan::Create(user) => (
                user.email.clone(),
                self.ctx
                    .users
                    .create(&user)
                    .await
                    .map(|_| ())
                    .map_err(|err| (CREATE_FAILED, err)),
            ),
            SavePlan::Update(id, user) => (
                user.email.clone(),
                self.ctx
                    .users
                    .update(&id, &user)
                    .await
                    .map_err(|err| (UPDATE_FAILED, err)),
            ),
        };

        match result {
            Ok(()) => {
                tracing::info!(%email, "user saved");
                self.state().finish_save();
                self.load().await;
            }
            Err((message, err)) => {
                tracing::error!("{message}: {err}");
                self.notifier().alert(message);
            }
        }
    }

    pub async fn cancel(&self) {
        self.state().cancel();
        self.load().await;
    }

    /// Delete the selected user after confirmation and re-issue the page query.
    pub async fn delete(&self) {
        let target = self.state().delete_target();
        match target {
            Ok(id) => self.delete_user(&id).await,
            Err(message) => self.notifier().alert(message),
        }
    }

    pub async fn delete_user(&self, id: &UserId) {
        if !self.notifier().confirm(CONFIRM_DELETE) {
            return;
        }
        match self.ctx.users.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "user deleted");
                self.load().await;
            }
            Err(err) => {
                tracing::error!(%id, "error deleting user: {err}");
                self.notifier().alert(DELETE_FAILED);
            }
        }
    }

    /// Prompt for a new password for the selected user and send it.
    ///
    /// The current password is sent empty; an administrator is resetting it.
    /// Returns whether the server accepted the new password.
    pub async fn change_password(&self) -> bool {
        let target = self.state().password_target();
        let user = match target {
            Ok(user) => user,
            Err(message) => {
                self.notifier().alert(message);
                return false;
            }
        };

        let Some(new_password) = self
            .notifier()
            .prompt(&new_password_prompt(&user))
            .filter(|p| !p.is_empty())
        else {
            return false;
        };
        if let Err(message) = check_new_password(&new_password) {
            self.notifier().alert(message);
            return false;
        }

        let Some(confirm) = self
            .notifier()
            .prompt(CONFIRM_PASSWORD)
            .filter(|p| !p.is_empty())
        else {
            return false;
        };
        if new_password != confirm {
            self.notifier().alert(PASSWORDS_DIFFER);
            return false;
        }

        let Some(id) = user.id.clone() else {
            self.notifier().alert(SELECT_TO_CHANGE_PASSWORD);
            return false;
        };
        let request = ChangePasswordRequest {
            current_password: String::new(),
            new_password,
            confirm_new_password: confirm,
        };
        match self.ctx.users.change_password(&id, &request).await {
            Ok(()) => {
                tracing::info!(%id, "password changed");
                self.notifier().alert(&format!(
                    "Password changed successfully for {}",
                    user.full_name()
                ));
                true
            }
            Err(err) => {
                tracing::error!(%id, "error changing password: {err}");
                self.notifier()
                    .alert(&format!("Error changing password: {}", change_password_reason(&err)));
                false
            }
        }
    }
}

fn change_password_reason(err: &ClientError) -> String {
    let message = err.user_message();
    if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}
