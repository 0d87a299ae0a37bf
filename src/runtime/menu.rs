//! Interactive menu read from standard input.
//!
//! Each prompt takes one line. Anything other than a listed digit, or end of
//! input, picks the prompt's default option.

use crate::service::{DemoError, Variant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Endpoint picked at the first prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScenarioChoice {
    Health,
    Users,
    Products,
    CreateProduct,
    #[default]
    All,
}

impl ScenarioChoice {
    pub const PROMPT: &'static str = "Which endpoint should we call?";
    pub const OPTIONS: [&'static str; 5] = [
        "GET /api/health",
        "GET /api/users",
        "GET /api/products",
        "POST /api/products",
        "Run every scenario",
    ];
    const ALL: [ScenarioChoice; 5] = [
        ScenarioChoice::Health,
        ScenarioChoice::Users,
        ScenarioChoice::Products,
        ScenarioChoice::CreateProduct,
        ScenarioChoice::All,
    ];

    /// Whether `variant` has a branch for this endpoint.
    pub fn served_by(self, variant: Variant) -> bool {
        match self {
            ScenarioChoice::Users => matches!(variant, Variant::Enhanced | Variant::Live),
            ScenarioChoice::Products | ScenarioChoice::CreateProduct => variant == Variant::Live,
            ScenarioChoice::Health | ScenarioChoice::All => true,
        }
    }

    /// Option labels for `variant`. Endpoints it does not serve are marked.
    pub fn options(variant: Variant) -> Vec<String> {
        Self::ALL
            .iter()
            .zip(Self::OPTIONS)
            .map(|(choice, label)| {
                if choice.served_by(variant) {
                    label.to_string()
                } else {
                    format!(
                        "{} (not in the {} variant, gets the default reply)",
                        label, variant
                    )
                }
            })
            .collect()
    }

    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(ScenarioChoice::Health),
            2 => Some(ScenarioChoice::Users),
            3 => Some(ScenarioChoice::Products),
            4 => Some(ScenarioChoice::CreateProduct),
            5 => Some(ScenarioChoice::All),
            _ => None,
        }
    }
}

/// Follow-up picked at the second prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NextStep {
    Fork,
    Endpoints,
    Deploy,
    Docs,
    #[default]
    All,
}

impl NextStep {
    pub const PROMPT: &'static str = "What would you like to do next?";
    pub const OPTIONS: [&'static str; 5] = [
        "Save my changes",
        "Add new endpoints",
        "Deploy to Cloudflare",
        "Read the docs",
        "Show every next step",
    ];

    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(NextStep::Fork),
            2 => Some(NextStep::Endpoints),
            3 => Some(NextStep::Deploy),
            4 => Some(NextStep::Docs),
            5 => Some(NextStep::All),
            _ => None,
        }
    }

    /// Guidance printed for this step.
    pub fn guidance(self) -> Vec<&'static str> {
        match self {
            NextStep::Fork => vec![NEXT_STEPS[0]],
            NextStep::Endpoints => vec![NEXT_STEPS[1]],
            NextStep::Deploy => vec![NEXT_STEPS[2]],
            NextStep::Docs => vec![NEXT_STEPS[3], NEXT_STEPS[4]],
            NextStep::All => NEXT_STEPS.to_vec(),
        }
    }
}

pub const NEXT_STEPS: [&str; 5] = [
    "1. Fork this project (top-right menu) to save your changes",
    "2. Add new endpoints or modify the response logic",
    "3. Ready to deploy? Visit: https://clodo.dev/cloudflare-pages-setup",
    "4. Learn more: https://clodo.dev/docs",
    "5. Close this tab to return to clodo.dev",
];

/// Parse a menu answer. Only a single digit from 1 to 5 counts.
pub fn parse_digit(line: &str) -> Option<u8> {
    match line.trim() {
        s if s.len() == 1 => s
            .parse::<u8>()
            .ok()
            .filter(|digit| (1..=5).contains(digit)),
        _ => None,
    }
}

/// Two-prompt menu over an async reader and writer.
pub struct Menu<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the menu, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Print `lines` to the menu's writer.
    pub async fn say(&mut self, lines: &[&str]) -> Result<(), DemoError> {
        for line in lines {
            self.writer.write_all(line.as_bytes()).await?;
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Ask one question and wait for a line. `None` on EOF or an invalid answer.
    pub async fn ask(
        &mut self,
        question: &str,
        options: &[impl AsRef<str>],
    ) -> Result<Option<u8>, DemoError> {
        let mut text = format!("\n❓ {}\n", question);
        for (i, option) in options.iter().enumerate() {
            text.push_str(&format!("  {}. {}\n", i + 1, option.as_ref()));
        }
        text.push_str("> ");
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            debug!("Input closed at prompt: {}", question);
            return Ok(None);
        }

        let digit = parse_digit(&line);
        if digit.is_none() {
            debug!("Unrecognized menu answer {:?}, using default", line.trim());
        }
        Ok(digit)
    }

    /// Ask for an endpoint, labelling the options for `variant`.
    pub async fn choose_scenario(
        &mut self,
        variant: Variant,
    ) -> Result<ScenarioChoice, DemoError> {
        let options = ScenarioChoice::options(variant);
        let answer = self.ask(ScenarioChoice::PROMPT, &options[..]).await?;
        Ok(answer
            .and_then(ScenarioChoice::from_digit)
            .unwrap_or_default())
    }

    pub async fn choose_next_step(&mut self) -> Result<NextStep, DemoError> {
        let answer = self.ask(NextStep::PROMPT, &NextStep::OPTIONS[..]).await?;
        Ok(answer.and_then(NextStep::from_digit).unwrap_or_default())
    }
}
