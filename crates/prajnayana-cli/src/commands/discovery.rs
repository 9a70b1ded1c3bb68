//! Self-discovery questionnaire commands for CLI.

use clap::Subcommand;
use prajnayana_core::questionnaire::{has_session_on, total_score, NewResponse};
use prajnayana_core::{today_local, LikertChoice};

use crate::common::{connect, print_json, CliResult};

#[derive(Subcommand)]
pub enum DiscoveryAction {
    /// List the questions and the answer scale
    Questions {
        #[arg(long)]
        json: bool,
    },
    /// Start today's test session
    Start,
    /// Answer one question in a session
    Answer {
        /// Test session ID
        session: i64,
        /// Question ID
        question: i64,
        /// 1-5 or the scale label, e.g. "Somewhat Agree"
        choice: String,
    },
    /// List past sessions with their scores
    Sessions {
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(action: DiscoveryAction) -> CliResult {
    let (_, client) = connect()?;

    match action {
        DiscoveryAction::Questions { json } => {
            let questions = client.list_questions().await?;
            if json {
                return print_json(&questions);
            }
            for q in &questions {
                println!("{:>4}  {}", q.id, q.text);
            }
            println!();
            for choice in LikertChoice::ALL {
                println!("  {} = {}", choice.score(), choice.label());
            }
        }
        DiscoveryAction::Start => {
            let sessions = client.list_sessions().await?;
            if has_session_on(&sessions, today_local()) {
                return Err("a test session was already taken today".into());
            }
            let session = client.create_session().await?;
            println!("Session started: {}", session.id);
        }
        DiscoveryAction::Answer {
            session,
            question,
            choice,
        } => {
            let choice = LikertChoice::parse(&choice)?;
            let stored = client
                .submit_response(&NewResponse::new(session, question, choice))
                .await?;
            println!("Answer saved: {} ({})", stored.id, choice);
        }
        DiscoveryAction::Sessions { json } => {
            let sessions = client.list_sessions().await?;
            let responses = client.list_responses().await?;
            let rows: Vec<_> = sessions
                .iter()
                .map(|s| {
                    let score = total_score(responses.iter().filter(|r| r.test_session == s.id));
                    (s, score)
                })
                .collect();

            if json {
                let out: Vec<_> = rows
                    .iter()
                    .map(|(s, score)| {
                        serde_json::json!({
                            "id": s.id,
                            "date_taken": s.date_taken,
                            "score": score,
                        })
                    })
                    .collect();
                return print_json(&out);
            }
            for (s, score) in rows {
                let taken = s
                    .date_taken
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".into());
                println!("{:>4}  {taken}  score {score}", s.id);
            }
        }
    }
    Ok(())
}
