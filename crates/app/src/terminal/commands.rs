//! Subcommand handlers.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;

use qwenht_auth::{FileTokenStore, Session};
use qwenht_client::{ClientConfig, Navigator, ReqwestTransport, Transport};
use qwenht_core::{NavigationItem, SortDirection, SortState, User, UserId};

use crate::terminal::args::{Cli, Command, RegisterArgs, UsersCommand};
use crate::terminal::console::{TerminalNavigator, TerminalNotifier};
use crate::views::{DashboardView, LoginForm, LoginView, RegisterForm, SidebarView, UsersView};
use crate::views::users::{COLUMNS, PAGE_SIZE};
use crate::{AppContext, Notifier, Router};

/// Build the production context from the command line and run one command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.identity_url {
        config = config.with_identity_server_url(url.clone());
    }
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.clone());
    }

    let store = match &cli.token_file {
        Some(path) => FileTokenStore::new(path),
        None => FileTokenStore::in_data_dir().context("locating the token file")?,
    };
    tracing::debug!(path = %store.path().display(), "token store");

    let session = Arc::new(Session::new(store));
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config)?);
    let navigator: Arc<dyn Navigator> = Arc::new(TerminalNavigator::new());
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier::new(cli.yes));
    let ctx = AppContext::new(config, session, transport, navigator, notifier);

    let mut stdout = std::io::stdout().lock();
    execute(&ctx, cli.command, &mut stdout).await
}

/// Run one command against `ctx`, writing results to `out`.
pub async fn execute(ctx: &AppContext, command: Command, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => ctx.notifier.prompt("Password:").unwrap_or_default(),
            };
            LoginView::new(ctx.clone())
                .submit(&LoginForm::new(username, password))
                .await?;
            writeln!(out, "Signed in as {}", ctx.session.user_name())?;
        }
        Command::Register(args) => register(ctx, args).await?,
        Command::Logout => {
            ctx.logout();
            writeln!(out, "Signed out")?;
        }
        Command::Whoami => whoami(ctx, out)?,
        Command::Nav { all } => {
            let mut sidebar = SidebarView::default();
            if all {
                sidebar.set_items(ctx.navigation.all().await?);
            } else {
                sidebar.load(&ctx.navigation).await;
            }
            print_menu(out, sidebar.items(), 0)?;
        }
        Command::Users(command) => users(ctx, command, out).await?,
        Command::Route { path } => {
            let resolution = Router::resolve(&path, &ctx.session, Utc::now());
            writeln!(out, "{}", resolution.hops.join(" -> "))?;
            writeln!(out, "{} ({})", resolution.route.title(), resolution.path())?;
        }
    }
    Ok(())
}

async fn register(ctx: &AppContext, args: RegisterArgs) -> anyhow::Result<()> {
    let password = match args.password {
        Some(p) => p,
        None => ctx.notifier.prompt("Password:").unwrap_or_default(),
    };
    let confirm_password = ctx
        .notifier
        .prompt("Confirm password:")
        .unwrap_or_default();
    let form = RegisterForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password,
        confirm_password,
        role: args.role,
    };
    LoginView::new(ctx.clone()).register(&form).await?;
    Ok(())
}

fn whoami(ctx: &AppContext, out: &mut dyn Write) -> anyhow::Result<()> {
    if !ctx.session.is_authenticated() {
        writeln!(out, "Not signed in")?;
        return Ok(());
    }
    let dashboard = DashboardView::from_context(ctx);
    writeln!(out, "{}", dashboard.user_name)?;
    writeln!(out, "roles: {}", dashboard.role_summary())?;
    if let Some(expires) = ctx.session.claims().and_then(|c| c.expires_at()) {
        writeln!(out, "expires: {}", expires.to_rfc3339())?;
    }
    Ok(())
}

async fn users(ctx: &AppContext, command: UsersCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        UsersCommand::List {
            page,
            sort,
            desc,
            search,
        } => {
            let view = UsersView::new(ctx.clone());
            view.update(|state| {
                state.change_page(page.saturating_sub(1), PAGE_SIZE);
                if let Some(field) = sort {
                    let direction = if desc {
                        SortDirection::Desc
                    } else {
                        SortDirection::Asc
                    };
                    state.sort = SortState::by(field, direction);
                }
                if let Some(term) = search {
                    state.search_term = term.trim().to_string();
                }
            });
            if let Err(err) = view.try_load().await {
                bail!("could not load users: {}", err.user_message());
            }
            print_users(out, &view)?;
        }
        UsersCommand::Get { id } => {
            let user = ctx.users.get(&parse_id(&id)?).await?;
            print_user(out, &user)?;
        }
        UsersCommand::Create {
            email,
            first_name,
            last_name,
            roles,
        } => {
            let user = User {
                id: None,
                email,
                first_name,
                last_name,
                roles,
                is_active: true,
            };
            match ctx.users.create(&user).await? {
                Some(created) => print_user(out, &created)?,
                None => writeln!(out, "Created {}", user.email)?,
            }
        }
        UsersCommand::Delete { id } => {
            let id = parse_id(&id)?;
            if !ctx
                .notifier
                .confirm(crate::views::users::CONFIRM_DELETE)
            {
                return Ok(());
            }
            ctx.users.delete(&id).await?;
            writeln!(out, "Deleted {id}")?;
        }
        UsersCommand::Passwd { id } => {
            let user = ctx.users.get(&parse_id(&id)?).await?;
            let view = UsersView::new(ctx.clone());
            view.update(|state| state.selected = Some(user));
            if !view.change_password().await {
                bail!("password was not changed");
            }
        }
    }
    Ok(())
}

fn parse_id(raw: &str) -> anyhow::Result<UserId> {
    match raw.parse::<UserId>() {
        Ok(id) => Ok(id),
        Err(err) => bail!("invalid user id {raw:?}: {err}"),
    }
}

fn print_users(out: &mut dyn Write, view: &UsersView) -> anyhow::Result<()> {
    let state = view.snapshot();
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(field, label)| format!("{label}{}", state.sort_indicator(field)))
        .collect();
    writeln!(out, "{:<12} {}", "ID", header.join(" | "))?;
    for user in &state.users {
        writeln!(
            out,
            "{:<12} {} | {} | {} | {}",
            user.id.as_ref().map(UserId::as_str).unwrap_or("-"),
            user.email,
            user.first_name,
            user.last_name,
            user.roles.join(", ")
        )?;
    }
    writeln!(
        out,
        "page {} of {} ({} users)",
        state.current_page + 1,
        state.total_pages().max(1),
        state.total_users
    )?;
    Ok(())
}

fn print_user(out: &mut dyn Write, user: &User) -> anyhow::Result<()> {
    writeln!(out, "id:     {}", user.id.as_ref().map(UserId::as_str).unwrap_or("-"))?;
    writeln!(out, "name:   {}", user.full_name())?;
    writeln!(out, "email:  {}", user.email)?;
    writeln!(out, "roles:  {}", user.roles.join(", "))?;
    writeln!(out, "active: {}", user.is_active)?;
    Ok(())
}

fn print_menu(out: &mut dyn Write, items: &[NavigationItem], depth: usize) -> anyhow::Result<()> {
    for item in items {
        writeln!(out, "{:indent$}{} {}", "", item.name, item.route, indent = depth * 2)?;
        print_menu(out, &item.children, depth + 1)?;
    }
    Ok(())
}
