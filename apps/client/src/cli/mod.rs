//! Command-line surface: argument definitions and the handlers that run
//! each command against [`AppState`].

pub mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::errors::ClientError;
use crate::hr::JobDraft;
use crate::models::application::Decision;
use crate::models::job::{split_requirements, JobUpdate};
use crate::models::session::Role;
use crate::state::AppState;
use crate::{account, candidate, chat, hr};

#[derive(Parser, Debug)]
#[command(name = "hireflow", version, about = "Job portal client for candidates and HR")]
pub struct Cli {
    /// Overrides API_URL for this invocation.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HIREFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Signs in with the backend's demo account for a role.
    DemoLogin {
        #[arg(default_value = "candidate")]
        role: Role,
    },
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HIREFLOW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "candidate")]
        role: Role,
    },
    Logout,
    Whoami,
    Jobs(JobsCommand),
    /// Applies to a job by uploading a resume (PDF, DOC, DOCX, PNG or JPG).
    Apply {
        jd_id: String,
        resume: PathBuf,
    },
    Applications,
    Notifications,
    Preferences(PreferencesCommand),
    /// Records an HR decision for one resume.
    Decide {
        resume_id: String,
        decision: Decision,
    },
    /// Shows why a resume scored the way it did.
    Explain {
        resume_id: String,
    },
    Profile(ProfileCommand),
    Chat(ChatCommand),
}

#[derive(Args, Debug)]
pub struct JobsCommand {
    #[command(subcommand)]
    pub command: JobsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum JobsSubcommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "", help = "Comma-separated list")]
        requirements: String,
        #[arg(long, help = "YYYY-MM-DD")]
        deadline: Option<String>,
    },
    Update {
        jd_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Comma-separated list")]
        requirements: Option<String>,
        #[arg(long, help = "YYYY-MM-DD")]
        deadline: Option<String>,
        #[arg(long, default_value_t = false)]
        close: bool,
    },
    /// Postings owned by the signed-in HR user.
    Mine,
    Candidates {
        jd_id: String,
    },
    /// Scores every resume for a posting, then lists the ranking.
    Rank {
        jd_id: String,
    },
    Resumes {
        jd_id: String,
    },
    /// Submits several decisions at once as `resume_id=decision` pairs.
    Submit {
        jd_id: String,
        #[arg(required = true)]
        decisions: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct PreferencesCommand {
    #[command(subcommand)]
    pub command: PreferencesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PreferencesSubcommand {
    Get {
        key: Option<String>,
    },
    Set {
        key: String,
        value: String,
    },
}

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    Name {
        name: String,
    },
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Args, Debug)]
pub struct ChatCommand {
    #[command(subcommand)]
    pub command: ChatSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChatSubcommand {
    Send {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    History,
    Clear,
    /// What the assistant knows about you for a posting.
    Context {
        jd_id: Option<String>,
    },
}

pub async fn run(state: &AppState, command: Command) -> Result<(), ClientError> {
    let api = &state.api;
    let auth = state.auth.as_ref();
    match command {
        Command::Login { email, password } => {
            let session = account::login(api, state.session(), &email, &password).await?;
            println!("Logged in as {} ({}).", session.display_name(), session.role);
        }
        Command::DemoLogin { role } => {
            let session = account::demo_login(api, state.session(), role).await?;
            println!("Logged in to the demo {} account.", session.role);
        }
        Command::Signup {
            email,
            password,
            role,
        } => {
            account::signup(api, &email, &password, role).await?;
            println!("Account created. Run `hireflow login` to sign in.");
        }
        Command::Logout => {
            account::logout(state.session())?;
            println!("Logged out.");
        }
        Command::Whoami => match state.session().current() {
            Some(session) => println!("{}", render::session(&session)),
            None => println!("Not logged in."),
        },
        Command::Jobs(jobs) => run_jobs(state, jobs.command).await?,
        Command::Apply { jd_id, resume } => {
            let receipt = candidate::apply(api, auth, &jd_id, &resume).await?;
            if receipt.message.is_empty() {
                println!("Application submitted.");
            } else {
                println!("{}", receipt.message);
            }
        }
        Command::Applications => {
            let apps = candidate::applications(api, auth).await?;
            println!("{}", render::applications(&apps));
        }
        Command::Notifications => {
            let items = candidate::notifications(api, auth).await?;
            println!("{}", render::notifications(&items));
        }
        Command::Preferences(prefs) => match prefs.command {
            PreferencesSubcommand::Get { key } => {
                let prefs = candidate::preferences(api, auth).await?;
                match key {
                    Some(key) => match prefs.get(&key) {
                        Some(value) => println!("{value}"),
                        None => println!("{key} is not set."),
                    },
                    None => println!("{}", serde_json::to_string_pretty(&prefs)?),
                }
            }
            PreferencesSubcommand::Set { key, value } => {
                let prefs = candidate::set_preference(api, auth, &key, &value).await?;
                println!("{}", serde_json::to_string_pretty(&prefs)?);
            }
        },
        Command::Decide {
            resume_id,
            decision,
        } => {
            let ack = hr::decide(api, auth, &resume_id, decision).await?;
            println!("{}", ack.message);
        }
        Command::Explain { resume_id } => {
            let explanation = hr::explain(api, auth, &resume_id).await?;
            println!("{}", render::explanation(&explanation));
        }
        Command::Profile(profile) => match profile.command {
            ProfileSubcommand::Name { name } => {
                account::update_name(api, auth, &name).await?;
                println!("Name updated.");
            }
            ProfileSubcommand::Password {
                current,
                new,
                confirm,
            } => {
                account::change_password(api, auth, &current, &new, &confirm).await?;
                println!("Password changed.");
            }
        },
        Command::Chat(chat) => run_chat(state, chat.command).await?,
    }
    Ok(())
}

async fn run_jobs(state: &AppState, command: JobsSubcommand) -> Result<(), ClientError> {
    let api = &state.api;
    let auth = state.auth.as_ref();
    match command {
        JobsSubcommand::List => {
            let jobs = candidate::list_jobs(api, auth).await?;
            println!("{}", render::jobs(&jobs));
        }
        JobsSubcommand::Create {
            title,
            description,
            requirements,
            deadline,
        } => {
            let draft = JobDraft {
                title,
                description,
                requirements,
                deadline,
            };
            let job = hr::create_job(api, auth, draft).await?;
            println!("Job posted.\n{}", render::job(&job));
        }
        JobsSubcommand::Update {
            jd_id,
            title,
            description,
            requirements,
            deadline,
            close,
        } => {
            let update = JobUpdate {
                title,
                description,
                requirements: requirements.as_deref().map(split_requirements),
                deadline,
                status: close.then(|| "closed".to_string()),
            };
            let job = hr::update_job(api, auth, &jd_id, update).await?;
            println!("Job updated.\n{}", render::job(&job));
        }
        JobsSubcommand::Mine => {
            let jobs = hr::my_jobs(api, auth).await?;
            println!("{}", render::jobs(&jobs));
        }
        JobsSubcommand::Candidates { jd_id } => {
            let list = hr::candidates(api, auth, &jd_id).await?;
            println!("{}", render::rankings(&list));
        }
        JobsSubcommand::Rank { jd_id } => {
            let (ack, list) = hr::rank(api, auth, &jd_id).await?;
            println!("{}\n{}", ack.message, render::rankings(&list));
        }
        JobsSubcommand::Resumes { jd_id } => {
            let records = hr::resumes(api, auth, &jd_id).await?;
            println!("{}", render::resumes(&records));
        }
        JobsSubcommand::Submit { jd_id, decisions } => {
            let items = hr::parse_decision_pairs(&decisions)?;
            let ack = hr::submit_decisions(api, auth, &jd_id, &items).await?;
            println!("{}", ack.message);
        }
    }
    Ok(())
}

async fn run_chat(state: &AppState, command: ChatSubcommand) -> Result<(), ClientError> {
    let api = &state.api;
    let auth = state.auth.as_ref();
    let state_dir = state.config.state_dir.as_path();
    match command {
        ChatSubcommand::Send { message } => {
            let added = chat::send(api, auth, state_dir, &message.join(" ")).await?;
            if !added.is_empty() {
                println!("{}", render::chat(&added));
            }
        }
        ChatSubcommand::History => {
            let transcript = chat::history(auth, state_dir)?;
            println!("{}", render::chat(&transcript.messages));
        }
        ChatSubcommand::Clear => {
            let transcript = chat::clear_history(auth, state_dir)?;
            println!("{}", render::chat(&transcript.messages));
        }
        ChatSubcommand::Context { jd_id } => {
            let context = chat::context(api, auth, state_dir, jd_id.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nested_commands() {
        let cli = Cli::try_parse_from([
            "hireflow", "jobs", "submit", "j1", "r1=selected", "r2=rejected",
        ])
        .unwrap();
        match cli.command {
            Command::Jobs(JobsCommand {
                command: JobsSubcommand::Submit { jd_id, decisions },
            }) => {
                assert_eq!(jd_id, "j1");
                assert_eq!(decisions.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_role_and_decision_arguments() {
        let cli = Cli::try_parse_from(["hireflow", "demo-login", "HR"]).unwrap();
        assert!(matches!(cli.command, Command::DemoLogin { role: Role::Hr }));

        let cli = Cli::try_parse_from(["hireflow", "decide", "r1", "reject"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Decide {
                decision: Decision::Rejected,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["hireflow", "decide", "r1", "maybe"]).is_err());
    }

    #[test]
    fn test_global_api_url_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hireflow", "chat", "send", "hello", "there", "--api-url", "http://x:9000",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://x:9000"));
    }
}
