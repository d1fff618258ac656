use std::io::{self, Write};

use chrono::Utc;

use knowledge_lab_client::client::LabClient;
use knowledge_lab_client::config::Config;
use knowledge_lab_client::models::domain::ExerciseType;
use knowledge_lab_client::services::answer_normalizer::find_option;
use knowledge_lab_client::services::{AttemptPhase, Countdown, Direction, ReviewService};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let exercise_type_tag =
        std::env::var("EXERCISE_TYPE").unwrap_or_else(|_| "lesson_exercise".to_string());
    let exercise_type = ExerciseType::parse(&exercise_type_tag)
        .unwrap_or_else(|| panic!("unknown EXERCISE_TYPE '{}'", exercise_type_tag));
    let exercise_id = std::env::var("EXERCISE_ID").expect("EXERCISE_ID must be set");

    let config = Config::from_env();
    if std::env::var("LAB_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let client = LabClient::new(config).expect("failed to build client");
    let exercise = client
        .load_exercise(exercise_type, &exercise_id)
        .await
        .expect("exercise not found");

    println!(
        "{} ({} questions, {} points)",
        exercise.title,
        exercise.questions.len(),
        exercise.total_points()
    );

    let mut controller = client.attempt(exercise);
    controller.start().await.expect("failed to start attempt");

    let countdown = Countdown::for_exercise(
        controller.machine().exercise(),
        controller.machine().started_at().unwrap_or_else(Utc::now),
    );

    while controller.phase() != AttemptPhase::Completed {
        if countdown.expired(Utc::now()) {
            println!("\nTime is up, submitting your answers.");
            if let Err(err) = controller.on_time_expired().await {
                // No automatic retries in this workflow.
                println!("{}", err);
                return;
            }
            continue;
        }

        let Some(question) = controller.machine().current_question() else {
            break;
        };
        let question_id = question.id.clone();

        println!(
            "\n[{}/{}] {}",
            controller.machine().cursor() + 1,
            controller.machine().exercise().questions.len(),
            question.prompt
        );
        for option in &question.options {
            let marker = if controller.machine().answer_for(&question_id)
                == Some(option.id.as_str())
            {
                "*"
            } else {
                " "
            };
            println!("  {}{}) {}", marker, option.label, option.text);
        }
        if let Some(remaining) = countdown.remaining_seconds(Utc::now()) {
            println!("  ({}s remaining)", remaining);
        }
        print!("answer label, n(ext), p(rev), submit, quit> ");
        io::stdout().flush().expect("failed to flush stdout");

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            break;
        }
        let input = line.trim();

        match input {
            "" => {}
            "n" => {
                controller.navigate(Direction::Next);
            }
            "p" => {
                controller.navigate(Direction::Previous);
            }
            "quit" => return,
            "submit" => {
                if let Err(err) = controller.submit().await {
                    println!("{}", err);
                }
            }
            _ => {
                let selected = controller
                    .machine()
                    .current_question()
                    .and_then(|q| find_option(q, input))
                    .map(|option| option.id.clone());
                match selected {
                    Some(option_id) => {
                        if let Err(err) = controller.record_answer(&question_id, &option_id) {
                            println!("{}", err);
                        } else {
                            controller.navigate(Direction::Next);
                        }
                    }
                    None => println!("no option matches '{}'", input),
                }
            }
        }
    }

    let review = ReviewService::build(controller.machine()).expect("review should be available");
    println!(
        "\nScore: {:.0}% ({}/{} points{})",
        review.score,
        review.points_earned,
        review.total_points,
        review
            .time_taken_seconds
            .map(|s| format!(", {}s", s))
            .unwrap_or_default()
    );
    for row in &review.rows {
        println!(
            "  [{}] {}",
            if row.is_correct { "ok" } else { "x" },
            row.prompt
        );
        println!(
            "      yours: {}  correct: {}",
            row.chosen_answer.as_deref().unwrap_or("-"),
            row.correct_answer
        );
        if let Some(explanation) = &row.explanation {
            println!("      {}", explanation);
        }
    }
}
