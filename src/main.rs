use clap::Parser;
use notepin::application::{
    init, AttachmentService, ClientContext, ConfigService, GroupService, NoteEditor,
    NoteListService, ThemeService,
};
use notepin::cli::{
    confirm, format_group_list, format_note_detail, format_note_list, Cli, Commands,
    GroupCommands, ViewArgs,
};
use notepin::domain::view::parse_date;
use notepin::domain::{TagFilter, TagMode, Theme, ViewState};
use notepin::error::NotepinError;
use notepin::infrastructure::{ClientState, FileStore, FileSystemRepository};
use std::io::Write;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("notepin={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), NotepinError> {
    let Some(command) = cli.command else {
        println!("notepin - Terminal client for a personal notes server");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init {
            path,
            server,
            csrf_token,
        } => init::init(&path, &server, csrf_token),
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("server_url = {}", config.server_url);
                println!(
                    "csrf_token = {}",
                    if config.csrf_token.is_some() { "(set)" } else { "" }
                );
                println!(
                    "session_cookie = {}",
                    if config.session_cookie.is_some() { "(set)" } else { "" }
                );
                println!("debounce_ms = {}", config.debounce_ms);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: notepin config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: {}",
                    notepin::application::manage_config::VALID_KEYS
                );
                Ok(())
            }
        }
        Commands::Theme { value } => {
            let repo = FileSystemRepository::discover()?;
            let service = ThemeService::new(ClientState::new(FileStore::new(repo.state_dir())));

            let theme = match value.as_deref() {
                None => service.current(),
                Some("toggle") => service.toggle(),
                Some(v) => service.set(Theme::from_str(v).map_err(NotepinError::InvalidInput)?),
            };
            println!("{}", theme);
            Ok(())
        }
        remote => run_remote(remote).await,
    }
}

/// Commands that talk to the notes server
async fn run_remote(command: Commands) -> Result<(), NotepinError> {
    let repo = FileSystemRepository::discover()?;
    let ctx = ClientContext::open(&repo)?;
    let debounce = ctx.config.debounce_window();
    let groups = GroupService::new(ctx.api.clone());
    let attachments = AttachmentService::new(ctx.api.clone());
    let mut list = NoteListService::new(ctx.api.clone(), ctx.state);
    let all = ViewState::new();

    match command {
        Commands::List { view } => {
            let view = build_view(&view, &groups).await?;
            list.reload(&view).await?;
            println!("{}", format_note_list(list.rendered(), &list.pinned()).trim_end());
        }
        Commands::Show { id } => {
            list.reload(&all).await?;
            let note = list.find(id).ok_or(NotepinError::NoteNotFound(id))?;
            print!("{}", format_note_detail(note, list.is_pinned(id)));
        }
        Commands::New => {
            let note = list.create_note(&all).await?;
            println!("Created note {}", note.id);
        }
        Commands::Edit {
            id,
            title,
            content,
            tags,
            groups: group_names,
            save,
        } => {
            list.reload(&all).await?;
            let note = list
                .find(id)
                .cloned()
                .ok_or(NotepinError::NoteNotFound(id))?;

            let untouched = title.is_none()
                && content.is_none()
                && tags.is_none()
                && group_names.is_none();
            if untouched && !save {
                println!("Nothing to change");
                return Ok(());
            }

            let mut editor = NoteEditor::new(ctx.api.clone(), &note, debounce);
            if let Some(title) = title {
                editor.set_title(&title);
            }
            if let Some(content) = content {
                editor.set_content(&content);
            }
            if let Some(tags) = tags {
                editor.set_tags(&tags);
            }
            if let Some(group_names) = group_names {
                editor.set_groups(&group_names);
            }
            if save {
                editor.save_now().await?;
            }
            editor.finish().await?;
            println!("Saved note {}", id);

            list.reload(&all).await?;
        }
        Commands::Duplicate { id } => {
            list.reload(&all).await?;
            let copy = list.duplicate_note(&all, id).await?;
            println!("Created note {} (copy of {})", copy.id, id);
        }
        Commands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete note {}?", id))? {
                println!("Cancelled");
                return Ok(());
            }
            list.delete_note(&all, id).await?;
            println!("Deleted note {}", id);
        }
        Commands::Pin { id } => {
            if list.toggle_pin(&all, id).await? {
                println!("Pinned note {}", id);
            } else {
                println!("Unpinned note {}", id);
            }
        }
        Commands::Move {
            dragged,
            target,
            view,
        } => {
            let view = build_view(&view, &groups).await?;
            list.reload(&view).await?;
            if !list.move_note(&view, dragged, target).await? {
                println!("Nothing to move");
            }
            println!("{}", format_note_list(list.rendered(), &list.pinned()).trim_end());
        }
        Commands::Groups { action } => match action.unwrap_or(GroupCommands::List) {
            GroupCommands::List => {
                println!("{}", format_group_list(&groups.list().await?, None).trim_end());
            }
            GroupCommands::Add { name } => {
                let group = groups.create(&name).await?;
                println!("Created group {} ({})", group.name, group.id);
            }
            GroupCommands::Rename { group, name } => {
                let group = groups.resolve(&group).await?;
                match groups.rename(&group, &name).await? {
                    Some(renamed) => println!("Renamed group {} to {}", group.name, renamed.name),
                    None => println!("Group unchanged"),
                }
            }
            GroupCommands::Delete { name, yes, view } => {
                let view = build_view(&view, &groups).await?;
                let group = groups.resolve(&name).await?;
                let question = format!(
                    "Delete group '{}'? Notes are kept, only the association is removed.",
                    group.name
                );
                if !yes && !confirm(&question)? {
                    println!("Cancelled");
                    return Ok(());
                }
                let next_view = groups.delete(group.id, &view).await?;
                println!("Deleted group {}", group.name);

                let remaining = groups.list().await?;
                println!("{}", format_group_list(&remaining, next_view.group_id).trim_end());
                list.reload(&next_view).await?;
                println!("{}", format_note_list(list.rendered(), &list.pinned()).trim_end());
            }
        },
        Commands::Attach { note_id, files } => {
            let paths: Vec<&std::path::Path> = files.iter().map(|p| p.as_path()).collect();
            for att in attachments.upload(note_id, &paths).await? {
                println!("Attached {} ({}) to note {}", att.filename, att.id, note_id);
            }
        }
        Commands::Fetch { id, output } => match output {
            Some(path) => {
                let written = attachments.save_to(id, &path).await?;
                println!("Saved {} bytes to {}", written, path.display());
            }
            None => {
                let blob = attachments.fetch(id).await?;
                let mut stdout = std::io::stdout();
                stdout.write_all(&blob.bytes)?;
                stdout.flush()?;
            }
        },
        Commands::Detach { id } => {
            attachments.delete(id).await?;
            println!("Deleted attachment {}", id);
        }
        Commands::Init { .. } | Commands::Config { .. } | Commands::Theme { .. } => {}
    }

    Ok(())
}

async fn build_view(args: &ViewArgs, groups: &GroupService) -> Result<ViewState, NotepinError> {
    let mode = TagMode::from_str(&args.mode).map_err(NotepinError::InvalidInput)?;
    let tags = args
        .tags
        .as_deref()
        .map(TagFilter::parse)
        .unwrap_or_default();
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let group_id = match args.group.as_deref() {
        Some(key) => Some(groups.resolve(key).await?.id),
        None => None,
    };

    Ok(ViewState::new()
        .with_group(group_id)
        .with_tags(tags, mode)
        .with_search(args.search.clone())
        .with_date(date))
}
