//! Scripted demo run.

use crate::http::{DemoRequest, DemoResponse};
use crate::runtime::menu::{Menu, NextStep, ScenarioChoice, NEXT_STEPS};
use crate::runtime::DemoConfig;
use crate::service::dispatch::NODE_ENV;
use crate::service::{
    select_factory, Backend, DemoError, Env, FrameworkFactory, Service, ServiceFactory, Variant,
};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;

/// A canned request and the environment it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub title: &'static str,
    pub request: DemoRequest,
    pub env: Env,
}

impl Scenario {
    fn new(title: &'static str, request: DemoRequest, env: Env) -> Self {
        Self {
            title,
            request,
            env,
        }
    }
}

const USER_AGENT: &str = "StackBlitz/1.0";

fn demo_env() -> Env {
    let mut env = Env::new();
    env.insert(NODE_ENV.to_string(), "demo".to_string());
    env
}

/// Scenarios exercised by a non-interactive run, in order.
pub fn scenarios(config: &DemoConfig) -> Vec<Scenario> {
    let mut list = vec![
        Scenario::new(
            "Basic request",
            DemoRequest::get("/api/demo").header("user-agent", USER_AGENT),
            demo_env(),
        ),
        Scenario::new(
            "Health check",
            DemoRequest::get("/api/health"),
            config.env.clone(),
        ),
    ];

    if matches!(config.variant, Variant::Enhanced | Variant::Live) {
        list.push(Scenario::new(
            "List users",
            DemoRequest::get("/api/users").header("user-agent", USER_AGENT),
            config.env.clone(),
        ));
    }

    if config.variant == Variant::Live {
        list.push(Scenario::new(
            "List products",
            DemoRequest::get("/api/products"),
            config.env.clone(),
        ));
        list.push(Scenario::new(
            "Create product",
            DemoRequest::post("/api/products")
                .header("content-type", "application/json")
                .body(r#"{"name":"Monitor","price":249.99}"#),
            config.env.clone(),
        ));
    }

    list
}

/// Scenarios selected at the first menu prompt.
pub fn scenarios_for_choice(choice: ScenarioChoice, config: &DemoConfig) -> Vec<Scenario> {
    let single = |title, request| vec![Scenario::new(title, request, config.env.clone())];

    match choice {
        ScenarioChoice::Health => single("Health check", DemoRequest::get("/api/health")),
        ScenarioChoice::Users => single(
            "List users",
            DemoRequest::get("/api/users").header("user-agent", USER_AGENT),
        ),
        ScenarioChoice::Products => single("List products", DemoRequest::get("/api/products")),
        ScenarioChoice::CreateProduct => single(
            "Create product",
            DemoRequest::post("/api/products").body(r#"{"name":"Monitor","price":249.99}"#),
        ),
        ScenarioChoice::All => scenarios(config),
    }
}

/// Send every scenario to the service.
pub fn run_scenarios(service: &Service, scenarios: &[Scenario]) -> Vec<DemoResponse> {
    println!("🧪 Testing service...");
    scenarios
        .iter()
        .map(|scenario| {
            info!(service = service.name(), "Scenario: {}", scenario.title);
            service.handle_request(&scenario.request, &scenario.env)
        })
        .collect()
}

/// Print the simulated install narration and wait out the delay.
pub async fn install(delay_ms: u64) {
    println!("📥 Installing Clodo Framework...");
    println!("⬇️  Downloading dependencies...");
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
    println!("✅ Clodo Framework installed successfully!");
    println!("🚀 Initializing framework...");
    println!();
}

/// Banner printed once the backend is known. Only the framework runs on the edge.
pub fn edge_banner(backend: Backend) -> Option<&'static str> {
    match backend {
        Backend::Framework => Some("🌐 Simulating edge computing with Cloudflare Workers"),
        Backend::Simulated => None,
    }
}

fn print_next_steps() {
    println!("✅ Ready to code! Edit the service logic and re-run to see changes.");
    println!();
    println!("🚀 NEXT STEPS:");
    for step in NEXT_STEPS {
        println!("{}", step);
    }
    println!();
    println!("💡 Tip: This demo runs instantly - no setup required!");
}

/// Run the whole demo.
///
/// The install narration comes first. `loader` is then tried for the
/// framework backend, and the chosen factory builds the one service.
/// With `config.interactive` set, the endpoint and the follow-up are picked
/// through `menu`; otherwise the menu is left untouched, every scenario runs
/// and all next steps print.
pub async fn run<R, W, L>(
    config: &DemoConfig,
    loader: L,
    menu: &mut Menu<R, W>,
) -> Result<Vec<DemoResponse>, DemoError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    L: FnOnce() -> Result<FrameworkFactory, DemoError>,
{
    install(config.install_delay_ms).await;

    let factory = select_factory(config.backend, loader);
    if let Some(banner) = edge_banner(factory.backend()) {
        println!("{}", banner);
    }
    println!();
    let service = factory.create(&config.service_name, config.variant);

    if !config.interactive {
        let responses = run_scenarios(&service, &scenarios(config));
        print_next_steps();
        return Ok(responses);
    }

    let choice = menu.choose_scenario(config.variant).await?;
    info!(?choice, "Scenario picked");
    let responses = run_scenarios(&service, &scenarios_for_choice(choice, config));

    let step = menu.choose_next_step().await?;
    info!(?step, "Next step picked");
    let mut lines = vec!["", "🚀 NEXT STEPS:"];
    lines.extend(step.guidance());
    menu.say(&lines).await?;

    if step == NextStep::All {
        menu.say(&["", "💡 Tip: This demo runs instantly - no setup required!"])
            .await?;
    }

    Ok(responses)
}
