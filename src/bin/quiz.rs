use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use quiz_query::clients::{ClientType, FlexibleClient, GeminiClient};
use quiz_query::config::{KeyFromEnv, ServiceConfig};
use quiz_query::fallback::{dedicated_topics, has_dedicated_bank};
use quiz_query::interceptors::FileInterceptor;
use quiz_query::{QuizService, QuizSet};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClientArg {
    Gemini,
    Mock,
}

impl From<ClientArg> for ClientType {
    fn from(arg: ClientArg) -> Self {
        match arg {
            ClientArg::Gemini => ClientType::Gemini,
            ClientArg::Mock => ClientType::Mock,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Generate AI quizzes with validated questions and fallbacks", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    GEMINI_API_KEY          API key for the Gemini client (required unless --client mock)
    GEMINI_MODEL            Model name [default: gemini-2.0-flash]
    QUIZ_MAX_ATTEMPTS       Model calls per quiz [default: 3]
    QUIZ_RETRY_DELAY_SECS   Pause between failed attempts [default: 2]
    QUIZ_EXCHANGE_LOG_DIR   Write every prompt/response to this directory
    RUST_LOG                Log filter [default: quiz_query=info]

EXAMPLES:
    quiz generate --topic \"World History\"
    quiz generate --topic Chess --client mock --answers 0,0,-,0,1
    quiz feedback --topic Wellness --score 4 --total 5
    quiz schema")]
struct Args {
    /// Set client type: gemini, mock (offline, always falls back) [default: gemini]
    #[arg(short, long, value_enum, global = true)]
    client: Option<ClientArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a five-question quiz
    Generate {
        #[arg(short, long)]
        topic: String,
        /// Print the quiz as JSON
        #[arg(long)]
        json: bool,
        /// Score these answers (comma separated option indexes, `-` for unanswered) and print feedback
        #[arg(long, value_delimiter = ',')]
        answers: Option<Vec<String>>,
    },
    /// Generate feedback for a score
    Feedback {
        #[arg(short, long)]
        topic: String,
        #[arg(long)]
        score: usize,
        #[arg(long, default_value_t = quiz_query::QUIZ_LENGTH)]
        total: usize,
    },
    /// Print the JSON Schema of a generated quiz
    Schema,
    /// Show configuration and topics with a dedicated fallback bank
    Check {
        /// Also report whether this topic has a dedicated fallback bank
        #[arg(short, long)]
        topic: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quiz_query=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn build_service(client_type: ClientType, config: &ServiceConfig) -> anyhow::Result<QuizService<FlexibleClient>> {
    let client = FlexibleClient::from_type(client_type, &config.model)
        .with_context(|| format!("cannot create {client_type} client"))?;

    let mut service = QuizService::new(client, config.retry.clone()).with_params(config.params);
    if let Some(dir) = &config.exchange_log_dir {
        service = service.with_interceptor(Arc::new(FileInterceptor::new(dir.clone())));
    }
    Ok(service)
}

fn parse_answers(raw: &[String]) -> anyhow::Result<Vec<Option<usize>>> {
    raw.iter()
        .map(|answer| match answer.trim() {
            "-" | "" => Ok(None),
            value => value
                .parse()
                .map(Some)
                .with_context(|| format!("invalid answer {value:?}")),
        })
        .collect()
}

fn print_quiz(quiz: &QuizSet) {
    for question in quiz {
        println!("{}. {}", question.id, question.question);
        for (i, option) in question.options.iter().enumerate() {
            let marker = if i == question.correct_index { '*' } else { ' ' };
            println!("   {marker} {i}) {option}");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = ServiceConfig::from_env()?;
    let client_type = args.client.map(ClientType::from).unwrap_or_default();

    match args.command {
        Command::Generate { topic, json, answers } => {
            let service = build_service(client_type, &config)?;
            let quiz = service.generate_quiz(&topic).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&quiz)?);
            } else {
                print_quiz(&quiz);
            }

            if let Some(raw) = answers {
                let answers = parse_answers(&raw)?;
                let score = quiz.score(&answers);
                let feedback = service
                    .generate_feedback(score, quiz.len(), &topic, quiz.questions(), &answers)
                    .await;
                println!("\nScore: {score}/{}\n{feedback}", quiz.len());
            }
        }
        Command::Feedback { topic, score, total } => {
            if score > total {
                bail!("score {score} is larger than total {total}");
            }
            let service = build_service(client_type, &config)?;
            println!("{}", service.generate_feedback(score, total, &topic, &[], &[]).await);
        }
        Command::Schema => {
            let schema = schemars::schema_for!(QuizSet);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Check { topic } => {
            let key = if GeminiClient::find_key().is_some() { "configured" } else { "missing api key" };
            println!("client:   {client_type}");
            println!("gemini:   {key}");
            println!("model:    {}", config.model);
            println!("attempts: {} (backoff {:?})", config.retry.max_attempts, config.retry.backoff);
            println!("fallback banks:");
            for name in dedicated_topics() {
                println!("  - {name}");
            }
            if let Some(topic) = topic {
                let bank = if has_dedicated_bank(&topic) { "dedicated" } else { "generic templates" };
                println!("{topic}: {bank}");
            }
        }
    }

    Ok(())
}
