use std::{collections::HashMap, fs, process::ExitCode};

use clap::Parser;
use policy_expression::{
    EvaluationError, ExpressionOutcome, PolicyEvaluator, PolicyOutcome,
    options::EvaluatorOptions,
};

/// policy-eval evaluates an AND/OR expression of named policies whose
/// outcomes are given on the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells policy-eval to read the expression from a file instead of the
    /// command line.
    #[arg(short, long)]
    file: bool,

    /// A policy that passes. May be repeated.
    #[arg(short, long = "pass", value_name = "NAME")]
    pass: Vec<String>,

    /// A policy that fails, optionally with a message. May be repeated.
    #[arg(short = 'F', long = "fail", value_name = "NAME[=MESSAGE]")]
    fail: Vec<String>,

    /// A policy that does not apply. May be repeated.
    #[arg(short, long = "not-applicable", value_name = "NAME")]
    not_applicable: Vec<String>,

    /// Logs every step of the evaluation.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

/// The policies known to this run, keyed by lower-cased name.
struct MasterData {
    policies: HashMap<String, PolicyOutcome>,
}

impl MasterData {
    fn from_args(args: &Args) -> Self {
        let mut policies = HashMap::new();
        for name in &args.pass {
            policies.insert(name.to_lowercase(), PolicyOutcome::pass());
        }
        for spec in &args.fail {
            let outcome = match spec.split_once('=') {
                Some((name, message)) => (name, PolicyOutcome::fail(message)),
                None => (spec.as_str(), PolicyOutcome::fail_default()),
            };
            policies.insert(outcome.0.to_lowercase(), outcome.1);
        }
        for name in &args.not_applicable {
            policies.insert(name.to_lowercase(), PolicyOutcome::not_applicable());
        }
        Self { policies }
    }

    fn contains(&self, name: &str) -> bool {
        self.policies.contains_key(&name.to_lowercase())
    }

    fn resolve(&self, name: &str) -> PolicyOutcome {
        self.policies
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| PolicyOutcome::invalid_policy_name(name))
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "trace" } else { "warn" };
    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env).format_timestamp(None)
                                      .format_module_path(false)
                                      .format_target(verbose)
                                      .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let expression = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(contents) => contents.trim_end_matches(['\r', '\n']).to_string(),
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::from(2);
            },
        }
    } else {
        args.contents.clone()
    };

    let mut builder =
        EvaluatorOptions::builder().check_policy_name_with(|name, data: &MasterData| data.contains(name));
    if args.verbose {
        builder = builder.log_with(|snapshot| println!("  {snapshot}"));
    }

    let evaluator = PolicyEvaluator::with_options(|name, data: &MasterData| data.resolve(name),
                                                  builder.build());
    let data = MasterData::from_args(&args);

    match evaluator.evaluate_expression(expression.as_str(), &data) {
        Ok(outcome @ ExpressionOutcome::Satisfied) => {
            println!("{outcome}");
            ExitCode::SUCCESS
        },
        Ok(outcome) => {
            println!("{outcome}");
            ExitCode::from(1)
        },
        Err(EvaluationError::Syntax(e)) => {
            eprintln!("{}", e.render(&expression));
            ExitCode::from(2)
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        },
    }
}
