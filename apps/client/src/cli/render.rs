// Plain-text rendering of API records for the terminal.

use std::fmt::Write;

use crate::chat::{ChatMessage, Sender};
use crate::models::application::{Application, Notification};
use crate::models::job::Job;
use crate::models::ranking::{format_score, CandidateRanking, RankingExplanation, ResumeRecord};
use crate::models::session::Session;

fn date(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn session(session: &Session) -> String {
    format!(
        "{} <{}>\n  role: {}\n  user id: {}",
        session.display_name(),
        session.email,
        session.role,
        session.user_id
    )
}

pub fn jobs(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return "No jobs found.".to_string();
    }
    let mut out = String::new();
    for job in jobs {
        let _ = write!(out, "[{}] {}", job.jd_id, job.title);
        if job.is_closed() {
            out.push_str(" (closed)");
        }
        if let Some(deadline) = &job.deadline {
            let _ = write!(out, "  deadline {deadline}");
        }
        out.push('\n');
        let requirements = job.requirements();
        if !requirements.is_empty() {
            let _ = writeln!(out, "    requires: {}", requirements.join(", "));
        }
    }
    out.trim_end().to_string()
}

pub fn job(job: &Job) -> String {
    let mut out = format!("[{}] {}", job.jd_id, job.title);
    let description = job.description();
    if !description.is_empty() {
        let _ = write!(out, "\n{description}");
    }
    let requirements = job.requirements();
    if !requirements.is_empty() {
        let _ = write!(out, "\nrequires: {}", requirements.join(", "));
    }
    out
}

pub fn applications(apps: &[Application]) -> String {
    if apps.is_empty() {
        return "You have not applied to any jobs yet.".to_string();
    }
    apps.iter()
        .map(|app| {
            format!(
                "[{}] {}  status: {}  applied: {}",
                app.jd_id,
                app.job_title(),
                app.display_status(),
                date(app.created_at)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn notifications(items: &[Notification]) -> String {
    if items.is_empty() {
        return "No notifications.".to_string();
    }
    items
        .iter()
        .map(|n| {
            let marker = if n.read { " " } else { "*" };
            match &n.title {
                Some(title) => format!("{marker} {} {title}: {}", date(n.created_at), n.message),
                None => format!("{marker} {} {}", date(n.created_at), n.message),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn rankings(candidates: &[CandidateRanking]) -> String {
    if candidates.is_empty() {
        return "No candidates yet.".to_string();
    }
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let decision = c.decision.map(|d| d.to_string()).unwrap_or_default();
            format!(
                "{:>2}. {:<8} {}  (resume {}) {}",
                i + 1,
                format_score(c.match_score),
                c.label(),
                c.resume_id,
                decision
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn resumes(records: &[ResumeRecord]) -> String {
    if records.is_empty() {
        return "No resumes uploaded for this job.".to_string();
    }
    records
        .iter()
        .map(|r| {
            format!(
                "[{}] {} yrs experience  skills: {}",
                r.resume_id,
                r.total_years(),
                if r.skills.is_empty() {
                    "-".to_string()
                } else {
                    r.skills.join(", ")
                }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn explanation(e: &RankingExplanation) -> String {
    let mut out = format!("score: {}", format_score(e.score));
    if !e.matched_skills.is_empty() {
        let _ = write!(out, "\nmatched: {}", e.matched_skills.join(", "));
    }
    if !e.missing_skills.is_empty() {
        let _ = write!(out, "\nmissing: {}", e.missing_skills.join(", "));
    }
    for (part, value) in &e.breakdown {
        let _ = write!(out, "\n  {part}: {}", format_score(Some(*value)));
    }
    if let Some(text) = &e.explanation {
        let _ = write!(out, "\n\n{text}");
    }
    out
}

pub fn chat(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| match m.sender {
            Sender::Bot => format!("bot> {}", m.text),
            Sender::User => format!("you> {}", m.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rankings_lines() {
        let list: Vec<CandidateRanking> = serde_json::from_value(serde_json::json!([
            {"resume_id": "r3", "name": "Ada", "match_score": 0.88, "decision": "selected"},
            {"resume_id": "r1"}
        ]))
        .unwrap();
        let text = rankings(&list);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with(" 1. 88%"));
        assert!(lines[0].ends_with("selected"));
        assert!(lines[1].contains("unranked"));
        assert!(lines[1].contains("r1"));
    }

    #[test]
    fn test_jobs_show_nested_requirements() {
        let list: Vec<Job> = serde_json::from_value(serde_json::json!([{
            "jd_id": 4, "title": "Data Analyst", "status": "closed",
            "job_descriptions": {"requirements": "SQL, Python"}
        }]))
        .unwrap();
        let text = jobs(&list);
        assert!(text.contains("[4] Data Analyst (closed)"));
        assert!(text.contains("requires: SQL, Python"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(jobs(&[]), "No jobs found.");
        assert_eq!(notifications(&[]), "No notifications.");
    }

    #[test]
    fn test_chat_prefixes() {
        let text = chat(&[ChatMessage::user("hi"), ChatMessage::bot("hello")]);
        assert_eq!(text, "you> hi\nbot> hello");
    }
}
