use super::HandlerContext;
use crate::output;
use anyhow::Result;
use reelguess_runtime::{DetailPresenter, GuessOutcome, PersonPresenter, Services};
use reelguess_types::{EntityKey, GuessStatus, MediaKind};

/// A detail screen: titles and people have different presenters but the
/// same guess actions.
enum Screen {
    Title(DetailPresenter),
    Person(PersonPresenter),
}

impl Screen {
    async fn open(services: &Services, key: EntityKey) -> Result<Self> {
        let screen = match key.kind {
            MediaKind::Movie | MediaKind::Tv => {
                Screen::Title(DetailPresenter::open_key(services.clone(), key).await?)
            }
            MediaKind::Person => {
                Screen::Person(PersonPresenter::open_id(services.clone(), key.id).await?)
            }
        };
        Ok(screen)
    }

    async fn print(&self, ctx: &HandlerContext) -> Result<()> {
        match self {
            Screen::Title(detail) => {
                let view = detail.view().await?;
                ctx.printer
                    .emit(&view, |printer| output::title(printer, &view))
            }
            Screen::Person(person) => {
                let view = person.view().await?;
                ctx.printer
                    .emit(&view, |printer| output::person(printer, &view))
            }
        }
    }

    fn reveal(&self) -> reelguess_runtime::Result<GuessStatus> {
        match self {
            Screen::Title(detail) => detail.reveal(),
            Screen::Person(person) => person.reveal(),
        }
    }

    fn show_hint(&self) -> reelguess_runtime::Result<String> {
        match self {
            Screen::Title(detail) => detail.show_hint(),
            Screen::Person(person) => person.show_hint(),
        }
    }

    fn guess(&self, text: &str) -> reelguess_runtime::Result<GuessOutcome> {
        match self {
            Screen::Title(detail) => detail.guess(text),
            Screen::Person(person) => person.guess(text),
        }
    }
}

pub async fn show(ctx: &HandlerContext, key: EntityKey) -> Result<()> {
    let screen = Screen::open(&ctx.services, key).await?;
    screen.print(ctx).await
}

pub async fn reveal(ctx: &HandlerContext, key: EntityKey) -> Result<()> {
    let screen = Screen::open(&ctx.services, key).await?;
    screen.reveal()?;
    screen.print(ctx).await
}

pub async fn hint(ctx: &HandlerContext, key: EntityKey) -> Result<()> {
    // Checked before opening so a locked hint costs no request.
    ctx.services.entitlements().require_upgrade()?;

    let screen = Screen::open(&ctx.services, key).await?;
    let hint = screen.show_hint()?;
    let value = serde_json::json!({ "key": key.to_string(), "hint": hint });
    ctx.printer.emit(&value, |_| println!("Hint: {}", hint))
}

pub async fn guess(ctx: &HandlerContext, key: EntityKey, text: &str) -> Result<()> {
    let screen = Screen::open(&ctx.services, key).await?;
    let outcome = screen.guess(text)?;
    ctx.printer
        .emit(&outcome, |printer| output::guess(printer, &outcome))
}

pub async fn credits(ctx: &HandlerContext, key: EntityKey) -> Result<()> {
    match Screen::open(&ctx.services, key).await? {
        Screen::Title(detail) => {
            let credits = detail.credits().await?;
            ctx.printer
                .emit(&credits, |printer| output::title_credits(printer, &credits))
        }
        Screen::Person(person) => {
            let credits = person.credits().await?;
            ctx.printer
                .emit(&credits, |printer| output::person_credits(printer, &credits))
        }
    }
}
