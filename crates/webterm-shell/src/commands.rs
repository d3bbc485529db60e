//! Built-in commands for the webterm session.

use async_trait::async_trait;
use webterm_types::{Result, ShellError};

use crate::markup::{self, Color};
use crate::network_commands::{ApiTestCmd, ListaCmd, PingCmd, SystemInfoCmd};
use crate::registry::{Command, CommandRegistry, Environment};
use crate::services::format_local;
use crate::text_commands::{GrepCmd, HeadCmd, TailCmd, WcCmd};

/// Register every built-in command.
///
/// The order here is the order `help` lists them in.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(Box::new(HelpCmd))?;
    reg.register(Box::new(ClearCmd))?;
    reg.register(Box::new(LsCmd))?;
    reg.register(Box::new(PwdCmd))?;
    reg.register(Box::new(CdCmd))?;
    reg.register(Box::new(WhoamiCmd))?;
    reg.register(Box::new(EchoCmd))?;
    reg.register(Box::new(DateCmd))?;
    reg.register(Box::new(PingCmd))?;
    reg.register(Box::new(SystemInfoCmd))?;
    reg.register(Box::new(ApiTestCmd))?;
    reg.register(Box::new(MkdirCmd))?;
    reg.register(Box::new(TouchCmd))?;
    reg.register(Box::new(GrepCmd))?;
    reg.register(Box::new(WcCmd))?;
    reg.register(Box::new(HeadCmd))?;
    reg.register(Box::new(TailCmd))?;
    reg.register(Box::new(HistoryCmd))?;
    reg.register(Box::new(ListaCmd))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;

#[async_trait]
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Mostra tutti i comandi disponibili"
    }
    async fn execute(&self, _args: &[String], env: &mut Environment<'_>) -> Result<String> {
        let lines: Vec<String> = env
            .registry
            .list()
            .map(|cmd| {
                let mut line = format!(
                    "{} - {}",
                    markup::paint(Color::Green, &format!("{:<12}", cmd.name())),
                    cmd.description()
                );
                if let Some(usage) = cmd.usage() {
                    line.push_str("\n    ");
                    line.push_str(&markup::paint(Color::Gray, &format!("Usage: {usage}")));
                }
                line
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;

#[async_trait]
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Pulisce lo schermo del terminale"
    }
    async fn execute(&self, _args: &[String], env: &mut Environment<'_>) -> Result<String> {
        env.session.clear_transcript();
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

/// An entry of the simulated home directory.
struct FixtureEntry {
    name: &'static str,
    kind: EntryKind,
    size: &'static str,
    modified: &'static str,
    hidden: bool,
}

const fn entry(
    name: &'static str,
    kind: EntryKind,
    size: &'static str,
    modified: &'static str,
    hidden: bool,
) -> FixtureEntry {
    FixtureEntry {
        name,
        kind,
        size,
        modified,
        hidden,
    }
}

const HOME_FIXTURE: [FixtureEntry; 9] = [
    entry("documenti", EntryKind::Directory, "4.0K", "Dec 10 14:30", false),
    entry("downloads", EntryKind::Directory, "8.0K", "Dec 9 10:15", false),
    entry("musica", EntryKind::Directory, "4.0K", "Dec 8 16:45", false),
    entry("immagini", EntryKind::Directory, "12K", "Dec 11 09:20", false),
    entry(".config", EntryKind::Directory, "4.0K", "Dec 5 11:30", true),
    entry("file1.txt", EntryKind::File, "1.2K", "Dec 10 14:30", false),
    entry("file2.pdf", EntryKind::File, "2.4M", "Dec 9 10:15", false),
    entry("foto.jpg", EntryKind::File, "4.8M", "Dec 8 16:45", false),
    entry(".log", EntryKind::File, "4.8K", "Dec 7 08:20", true),
];

struct LsCmd;

#[async_trait]
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "Lista i file e le directory"
    }
    fn usage(&self) -> Option<&str> {
        Some("ls [opzioni] [directory]")
    }
    async fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<String> {
        let has = |short: &str, long: &str| args.iter().any(|a| a == short || a == long);
        let show_all = has("-a", "--all");
        let long_format = has("-l", "--long");
        // Sizes in the fixture are already human readable; -h only drops padding.
        let human = has("-h", "--human-readable");

        let visible = HOME_FIXTURE.iter().filter(|e| show_all || !e.hidden);

        if long_format {
            let user = env.session.user();
            let lines: Vec<String> = visible
                .map(|e| {
                    let permissions = match e.kind {
                        EntryKind::Directory => "drwxr-xr-x",
                        EntryKind::File => "-rw-r--r--",
                    };
                    let size = if human {
                        e.size.to_string()
                    } else {
                        format!("{:>6}", e.size)
                    };
                    format!(
                        "{permissions} 1 {user} {user} {size} {} {}",
                        e.modified, e.name
                    )
                })
                .collect();
            return Ok(lines.join("\n"));
        }

        let names: Vec<&str> = visible.map(|e| e.name).collect();
        Ok(names.join("  "))
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;

#[async_trait]
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Mostra la directory corrente"
    }
    async fn execute(&self, _args: &[String], env: &mut Environment<'_>) -> Result<String> {
        Ok(env.session.cwd().to_string())
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

/// Relative targets `cd` accepts besides absolute paths.
const KNOWN_DIRECTORIES: [&str; 6] = ["~", "documenti", "downloads", "musica", "immagini", ".."];

struct CdCmd;

#[async_trait]
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Cambia directory"
    }
    fn usage(&self) -> Option<&str> {
        Some("cd [directory]")
    }
    async fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<String> {
        let session = &mut *env.session;
        let home = session.home().to_string();
        let Some(target) = args.first() else {
            session.set_cwd(home);
            return Ok(String::new());
        };

        let known = target == &home || KNOWN_DIRECTORIES.contains(&target.as_str());
        if !known && !target.starts_with('/') {
            return Err(ShellError::InvalidTarget(format!(
                "cd: {target}: No such file or directory"
            )));
        }

        let next = if target == ".." {
            parent_of(session.cwd(), &home)
        } else if target == "~" || target == &home {
            home
        } else if target.starts_with('/') {
            target.clone()
        } else if session.is_home() {
            target.clone()
        } else {
            format!("{}/{target}", session.cwd())
        };
        session.set_cwd(next);
        Ok(String::new())
    }
}

/// Drop the last path segment, falling back to `home` when nothing remains.
fn parent_of(cwd: &str, home: &str) -> String {
    match cwd.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent.to_string(),
        _ => home.to_string(),
    }
}

// ---------------------------------------------------------------------------
// whoami / echo / date
// ---------------------------------------------------------------------------

struct WhoamiCmd;

#[async_trait]
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Mostra il nome utente corrente"
    }
    async fn execute(&self, _args: &[String], env: &mut Environment<'_>) -> Result<String> {
        Ok(env.session.user().to_string())
    }
}

struct EchoCmd;

#[async_trait]
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Visualizza il testo passato come argomento"
    }
    fn usage(&self) -> Option<&str> {
        Some("echo [testo]")
    }
    async fn execute(&self, args: &[String], _env: &mut Environment<'_>) -> Result<String> {
        Ok(args.join(" "))
    }
}

struct DateCmd;

#[async_trait]
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Mostra la data e ora corrente"
    }
    async fn execute(&self, _args: &[String], env: &mut Environment<'_>) -> Result<String> {
        Ok(format_local(&env.clock.now()))
    }
}

// ---------------------------------------------------------------------------
// mkdir / touch (simulated, nothing is stored)
// ---------------------------------------------------------------------------

struct MkdirCmd;

#[async_trait]
impl Command for MkdirCmd {
    fn name(&self) -> &str {
        "mkdir"
    }
    fn description(&self) -> &str {
        "Crea una nuova directory"
    }
    fn usage(&self) -> Option<&str> {
        Some("mkdir [nome]")
    }
    async fn execute(&self, args: &[String], _env: &mut Environment<'_>) -> Result<String> {
        let name = args
            .first()
            .ok_or_else(|| ShellError::MissingOperand("mkdir: missing operand".to_string()))?;
        Ok(format!("Directory '{name}' created successfully"))
    }
}

struct TouchCmd;

#[async_trait]
impl Command for TouchCmd {
    fn name(&self) -> &str {
        "touch"
    }
    fn description(&self) -> &str {
        "Crea un nuovo file"
    }
    fn usage(&self) -> Option<&str> {
        Some("touch [nome]")
    }
    async fn execute(&self, args: &[String], _env: &mut Environment<'_>) -> Result<String> {
        let name = args.first().ok_or_else(|| {
            ShellError::MissingOperand("touch: missing file operand".to_string())
        })?;
        Ok(format!("File '{name}' created successfully"))
    }
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

struct HistoryCmd;

#[async_trait]
impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "Mostra la cronologia dei comandi"
    }
    async fn execute(&self, _args: &[String], env: &mut Environment<'_>) -> Result<String> {
        let lines: Vec<String> = env
            .session
            .command_history()
            .iter()
            .enumerate()
            .map(|(i, cmd)| format!(" {}  {cmd}", i + 1))
            .collect();
        Ok(lines.join("\n"))
    }
}
