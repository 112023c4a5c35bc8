mod config;
mod render;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use booking_core::{
    guard, submit_auth, AuthContext, AuthForm, AuthMode, BookingError, BookingFlow,
    DetailLoader, MovieListing, Navigation, Notice, NoticeContext, PaymentGateway, Route,
    SimulatedGateway, TicketIssuer, TicketView, TmdbCatalog, UuidEntropy, ViewScope,
};
use clap::{Args, Parser, Subcommand};
use config::{load_settings, normalize_database_url, Settings};
use shared::{
    domain::{MovieId, SeatId, Snack},
    protocol::MovieRecord,
};
use storage::Storage;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cinema", about = "Book a movie ticket from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in, or create an account with --sign-up.
    Login(LoginArgs),
    Logout,
    /// Show the signed-in user and the stored session entries.
    Status,
    /// List films now playing.
    Movies {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one film and its seating chart.
    Movie { id: i64 },
    Book(BookArgs),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    sign_up: bool,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    postal_code: String,
}

#[derive(Args, Debug)]
struct BookArgs {
    #[arg(long)]
    movie_id: i64,
    /// Seat id such as `B3`; repeat for several seats.
    #[arg(long = "seat", required = true)]
    seats: Vec<String>,
    /// popcorn, chocolate, water, soda or nothing.
    #[arg(long)]
    snack: String,
    #[arg(long)]
    card_name: String,
    #[arg(long)]
    card_number: String,
    #[arg(long)]
    expiry: String,
    #[arg(long)]
    cvv: String,
    /// Make the simulated gateway refuse the charge.
    #[arg(long)]
    decline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(%database_url, %error, "failed to open session store");
        error
    })?;
    storage.health_check().await?;
    let auth = AuthContext::new(Arc::new(storage.clone()));

    match cli.command {
        Command::Login(args) => login(args, &auth, &settings).await,
        Command::Logout => {
            auth.logout().await?;
            println!("Déconnecté.");
            Ok(())
        }
        Command::Status => status(&auth, &storage).await,
        Command::Movies { search } => movies(search, &auth, &settings).await,
        Command::Movie { id } => movie(MovieId(id), &auth, &settings).await,
        Command::Book(args) => book(args, &auth, &settings).await,
    }
}

/// Prints the notice for `error`, if any, and hands the error back for exit.
fn surface(error: BookingError, context: NoticeContext) -> anyhow::Error {
    debug!(code = ?error.code(), %error, "surfacing booking error");
    if let Some(notice) = Notice::from_error(&error, context) {
        eprintln!("{notice}");
    }
    error.into()
}

async fn enter(route: Route, auth: &AuthContext) -> Result<()> {
    let navigation = guard(Navigation::push(route), auth).await?;
    if navigation.route != route {
        return Err(surface(BookingError::Unauthenticated, NoticeContext::Auth))
            .with_context(|| format!("{route} requires a session; run `cinema login` first"));
    }
    Ok(())
}

async fn login(args: LoginArgs, auth: &AuthContext, settings: &Settings) -> Result<()> {
    let form = AuthForm {
        mode: if args.sign_up {
            AuthMode::SignUp
        } else {
            AuthMode::Login
        },
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password: args.password,
        postal_code: args.postal_code,
    };
    let next = submit_auth(&form, auth, settings.auth_delay())
        .await
        .map_err(|err| surface(err, NoticeContext::Auth))?;
    println!("{}", Notice::signed_in(form.mode));
    info!(route = %next.route, "continuing after sign-in");
    Ok(())
}

async fn status(auth: &AuthContext, storage: &Storage) -> Result<()> {
    match auth.current_user().await? {
        Some(user) => println!("Connecté : {} {} <{}>", user.first_name, user.last_name, user.email),
        None => println!("Non connecté."),
    }
    for entry in storage.list_entries().await? {
        println!("  {} (mis à jour {})", entry.key, entry.updated_at.to_rfc3339());
    }
    Ok(())
}

async fn movies(search: Option<String>, auth: &AuthContext, settings: &Settings) -> Result<()> {
    enter(Route::Movies, auth).await?;
    let catalog = TmdbCatalog::new(settings.tmdb()?);
    let scope = ViewScope::new("movies");

    let mut listing = MovieListing::default();
    listing
        .load(&catalog, &scope.handle())
        .await
        .map_err(|err| surface(err, NoticeContext::Listing))?;
    if let Some(term) = search {
        listing.set_search(term);
    }

    let visible = listing.visible();
    if visible.is_empty() {
        println!("Aucun film trouvé.");
    }
    for movie in visible {
        println!("{}", render::movie_line(movie));
    }
    Ok(())
}

async fn load_movie(
    id: MovieId,
    settings: &Settings,
    scope: &ViewScope,
) -> Result<MovieRecord> {
    let catalog = TmdbCatalog::new(settings.tmdb()?);
    DetailLoader::default()
        .load(&catalog, id, &scope.handle())
        .await
        .map_err(|err| surface(err, NoticeContext::Detail))?
        .with_context(|| format!("catalog answered for a different movie than {id}"))
}

async fn movie(id: MovieId, auth: &AuthContext, settings: &Settings) -> Result<()> {
    enter(Route::MovieDetail(id), auth).await?;
    let scope = ViewScope::new("movie_detail");
    let movie = load_movie(id, settings, &scope).await?;

    println!("{}", render::movie_detail(&movie, &settings.poster_base_url));
    let flow = BookingFlow::new(movie, &mut UuidEntropy);
    println!();
    println!("{}", render::seat_grid(flow.seat_map()));
    Ok(())
}

async fn book(args: BookArgs, auth: &AuthContext, settings: &Settings) -> Result<()> {
    let id = MovieId(args.movie_id);
    enter(Route::MovieDetail(id), auth).await?;
    let scope = ViewScope::new("movie_detail");
    let movie = load_movie(id, settings, &scope).await?;

    let mut flow = BookingFlow::new(movie, &mut UuidEntropy);
    let booking = |err: BookingError| surface(err, NoticeContext::Booking);

    let seats = args
        .seats
        .iter()
        .map(|raw| raw.parse::<SeatId>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| booking(BookingError::from(err)))?;
    if let Err(err) = flow.select_seats(seats) {
        println!("{}", render::seat_grid(flow.seat_map()));
        return Err(booking(err));
    }
    println!("{}", render::seat_grid(flow.seat_map()));
    flow.next_step().map_err(booking)?;

    let snack: Snack = args
        .snack
        .parse()
        .map_err(|err| booking(BookingError::from(err)))?;
    flow.select_snack(snack).map_err(booking)?;
    flow.next_step().map_err(booking)?;

    let payment = flow.payment_mut();
    payment.set_card_name(&args.card_name);
    payment.set_card_number(&args.card_number);
    payment.set_expiry_date(&args.expiry);
    payment.set_cvv(&args.cvv);

    let gateway = if args.decline {
        SimulatedGateway::declining(settings.payment_delay())
    } else {
        SimulatedGateway::new(settings.payment_delay())
    };
    let pending = flow.begin_payment().map_err(booking)?;
    if flow.is_processing() {
        println!("Traitement du paiement...");
    }
    let outcome = match scope.handle().run(gateway.charge(pending.details())).await {
        Ok(outcome) => outcome,
        Err(err) => {
            flow.abandon_payment();
            return Err(booking(err));
        }
    };
    let completed = flow.finish_payment(pending, outcome).map_err(booking)?;
    println!("{}", Notice::payment_succeeded());

    let navigation = guard(Navigation::to_ticket(completed.payload), auth).await?;
    let today = chrono::Local::now().date_naive();
    match TicketIssuer::new(settings.poster_base_url.clone()).issue(
        navigation.state.as_ref(),
        &mut UuidEntropy,
        today,
    )? {
        TicketView::Issued(ticket) => println!("\n{}", render::ticket(&ticket)),
        TicketView::Redirect(to) => {
            bail!("no booking reached the ticket view; redirected to {}", to.route)
        }
    }
    Ok(())
}
