//! Built-in commands for the portfolio terminal.

use termfolio_types::config::{Experience, Profile, Project};
use termfolio_types::error::Result;

use crate::display::{DisplayValue, Node, Tone};
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};
use crate::secret::Secret;

/// Shown by `echo` when its argument is the session secret.
pub const CONGRATULATIONS: &str = "Congratulations! You found the secret message.";

/// Format used by `date`.
const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Register all built-in commands, in the order `help` lists them.
pub fn register_builtins(reg: &mut CommandRegistry, profile: &Profile, secret: &Secret) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(AboutCmd {
        headline: profile.headline.clone(),
    }));
    reg.register(Box::new(ProjectsCmd {
        projects: profile.projects.clone(),
    }));
    reg.register(Box::new(ContactCmd {
        email: profile.email.clone(),
        linkedin: profile.linkedin.clone(),
        github: profile.github.clone(),
    }));
    reg.register(Box::new(ExperienceCmd {
        experience: profile.experience.clone(),
    }));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(ResumeCmd {
        note: profile.resume_note.clone(),
    }));
    reg.register(Box::new(EchoCmd {
        secret: secret.plaintext().to_string(),
    }));
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(WhoamiCmd {
        whoami: profile.whoami.clone(),
    }));
    crate::register_fun_commands(reg);
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

/// Placeholder entry; the registry answers `help` itself so it can list every
/// command.
struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Show available commands"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::text("Type 'help' to see available commands."))
    }
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

struct AboutCmd {
    headline: String,
}
impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }
    fn description(&self) -> &str {
        "Display information about me"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(Node::Line(Tone::Plain, self.headline.clone()).into())
    }
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

struct ProjectsCmd {
    projects: Vec<Project>,
}
impl Command for ProjectsCmd {
    fn name(&self) -> &str {
        "projects"
    }
    fn description(&self) -> &str {
        "View my projects"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut nodes = vec![Node::Line(Tone::Accent, "Projects:".to_string())];
        for project in &self.projects {
            nodes.push(Node::Blank);
            nodes.push(Node::Line(Tone::Highlight, project.name.clone()));
            if !project.tech.is_empty() {
                nodes.push(Node::Line(Tone::Info, format!("Tech: {}", project.tech)));
            }
            if !project.description.is_empty() {
                nodes.push(Node::Line(Tone::Plain, project.description.clone()));
            }
        }
        nodes.push(Node::Blank);
        nodes.push(Node::Line(
            Tone::Muted,
            "Type 'project [name]' for more details about a specific project.".to_string(),
        ));
        Ok(Node::Group(nodes).into())
    }
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

struct ContactCmd {
    email: String,
    linkedin: String,
    github: String,
}
impl Command for ContactCmd {
    fn name(&self) -> &str {
        "contact"
    }
    fn description(&self) -> &str {
        "Get my contact information"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let rows = [
            ("Email:", &self.email),
            ("LinkedIn:", &self.linkedin),
            ("GitHub:", &self.github),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
        Ok(Node::Group(vec![
            Node::Line(Tone::Accent, "Contact Information:".to_string()),
            Node::Pairs { key_width: 12, rows },
        ])
        .into())
    }
}

// ---------------------------------------------------------------------------
// experience
// ---------------------------------------------------------------------------

struct ExperienceCmd {
    experience: Vec<Experience>,
}
impl Command for ExperienceCmd {
    fn name(&self) -> &str {
        "experience"
    }
    fn description(&self) -> &str {
        "View my work experience"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut nodes = vec![Node::Line(Tone::Accent, "Work Experience:".to_string())];
        for exp in &self.experience {
            nodes.push(Node::Blank);
            let mut heading = vec![(Tone::Highlight, exp.role.clone())];
            if !exp.period.is_empty() {
                heading.push((Tone::Info, format!("  ({})", exp.period)));
            }
            nodes.push(Node::Spans(heading));
            if !exp.company.is_empty() {
                nodes.push(Node::Line(Tone::Muted, exp.company.clone()));
            }
            if !exp.description.is_empty() {
                nodes.push(Node::Line(Tone::Plain, exp.description.clone()));
            }
        }
        Ok(Node::Group(nodes).into())
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// resume
// ---------------------------------------------------------------------------

/// Simulated download. The output is produced asynchronously, as a real
/// download would be.
struct ResumeCmd {
    note: String,
}
impl Command for ResumeCmd {
    fn name(&self) -> &str {
        "resume"
    }
    fn description(&self) -> &str {
        "Download my resume"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let note = self.note.clone();
        Ok(CommandOutput::Deferred(Box::pin(async move {
            Ok(DisplayValue::Structured(Node::Group(vec![
                Node::Spans(vec![
                    (Tone::Accent, "Downloading resume... ".to_string()),
                    (Tone::Highlight, "[simulation]".to_string()),
                ]),
                Node::Line(Tone::Muted, note),
            ])))
        })))
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd {
    secret: String,
}
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Echo a message"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let joined = args.join(" ");
        if !self.secret.is_empty() && joined == self.secret {
            log::info!("Session secret found");
            return Ok(Node::Line(Tone::Accent, CONGRATULATIONS.to_string()).into());
        }
        Ok(CommandOutput::text(joined))
    }
}

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Display current date and time"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let now = env.clock.now();
        Ok(CommandOutput::text(now.format(DATE_FORMAT).to_string()))
    }
}

// ---------------------------------------------------------------------------
// whoami
// ---------------------------------------------------------------------------

struct WhoamiCmd {
    whoami: String,
}
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Display user information"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::text(self.whoami.clone()))
    }
}
