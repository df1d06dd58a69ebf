//! Tile Tap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use tile_tap::renderer::CanvasRenderer;
    use tile_tap::sim::{Board, GamePhase, GameState, TickInput, tick};
    use tile_tap::{EngineConfig, Leaderboard, Profile, backend};

    // JS binding for the Telegram Mini App user identity
    #[wasm_bindgen(inline_js = "
        export function telegram_username() {
            const user = window.Telegram?.WebApp?.initDataUnsafe?.user;
            if (!user) return 'Username';
            if (user.username) return user.username;
            const name = `${user.first_name ?? ''} ${user.last_name ?? ''}`.trim();
            return name || 'Username';
        }
    ")]
    extern "C" {
        fn telegram_username() -> String;
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        input: TickInput,
        profile: Option<Profile>,
        username: String,
        last_time: f64,
        // Track phase for the game-over report
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, board: Board, config: EngineConfig) -> Self {
            Self {
                state: GameState::new(seed, board, config),
                renderer: None,
                input: TickInput::default(),
                profile: None,
                username: String::new(),
                last_time: 0.0,
                last_phase: GamePhase::Idle,
            }
        }

        /// Convert client coordinates to board coordinates, absorbing the
        /// CSS-to-canvas scale factor
        fn client_to_board(&self, canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
            let rect = canvas.get_bounding_client_rect();
            let scale_x = f64::from(canvas.width()) / rect.width().max(1.0);
            let scale_y = f64::from(canvas.height()) / rect.height().max(1.0);
            Vec2::new(
                ((client_x - rect.left()) * scale_x) as f32,
                ((client_y - rect.top()) * scale_y) as f32,
            )
        }

        /// Run one simulation step, consuming the queued taps
        fn update(&mut self, dt: f32) {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, dt);
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                if let Err(e) = renderer.render(&self.state) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        /// Start a fresh round (after a ticket was spent)
        fn restart(&mut self, seed: u64) {
            let board = self.state.board;
            let config = self.state.config;
            self.state = GameState::new(seed, board, config);
            self.input = TickInput::default();
            self.state.start();
        }
    }

    /// Set an element's text content by id (HUD helper)
    fn set_text(id: &str, text: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    /// Show or hide a screen-level element by id
    fn set_hidden(id: &str, hidden: bool) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }
    }

    fn update_balance_hud(profile: &Profile) {
        set_text("points", &profile.points.to_string());
        set_text("ticketsInfo", &profile.tickets.to_string());
    }

    fn render_leaderboard(board: &Leaderboard) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = document.get_element_by_id("leaderboard") {
                let html: String = board
                    .entries
                    .iter()
                    .map(|e| format!("<li>{}: {}</li>", e.username, e.points))
                    .collect();
                el.set_inner_html(&html);
            }
        }
    }

    /// Final score report and return to the start screen
    fn on_game_over(game: &mut Game) {
        let score = game.state.score;
        log::info!("Game over, score: {}", score);

        if let Some(profile) = game.profile.as_mut() {
            profile.apply_game_result(score);
            update_balance_hud(profile);
        }

        // Fire-and-forget score report; a network failure only costs the
        // persisted score, never the session.
        let username = game.username.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match backend::save_score(&username, score).await {
                Ok(resp) if resp.success => {
                    log::info!("Score saved ({} points total)", resp.points.unwrap_or_default());
                }
                Ok(resp) => {
                    log::warn!("Score rejected: {:?}", resp.error);
                }
                Err(e) => log::error!("Failed to save score: {:?}", e),
            }
        });

        set_text("finalScore", &score.to_string());
        set_hidden("startScreen", false);
        set_hidden("gameOver", false);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tile Tap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (f64::from(client_w) * dpr) as u32;
        let height = (f64::from(client_h) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let config = EngineConfig::load();
        let board = Board::new(width as f32, height as f32, config.columns, config.vertical_gap);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, board, config)));

        let username = telegram_username();
        set_text("userInfo", &username);
        game.borrow_mut().username = username.clone();

        log::info!("Game initialized with seed {} for {}", seed, username);

        match CanvasRenderer::new(canvas.clone()) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Failed to create renderer: {:?}", e),
        }

        // Fetch the player's balance; play stays gated until it arrives
        {
            let game = game.clone();
            let username = username.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match backend::fetch_user_data(&username).await {
                    Ok(resp) => match resp.into_profile(&username) {
                        Some(profile) => {
                            update_balance_hud(&profile);
                            game.borrow_mut().profile = Some(profile);
                        }
                        None => log::error!("Failed to fetch user data: backend rejected"),
                    },
                    Err(e) => log::error!("Error fetching user data: {:?}", e),
                }
            });
        }

        // Leaderboard: render the cache immediately, then refresh
        render_leaderboard(&Leaderboard::load_cached());
        wasm_bindgen_futures::spawn_local(async move {
            match backend::fetch_top_users().await {
                Ok(entries) => {
                    let leaderboard = Leaderboard::from_entries(entries);
                    leaderboard.cache();
                    render_leaderboard(&leaderboard);
                }
                Err(e) => log::warn!("Error fetching top users: {:?}", e),
            }
        });

        setup_input_handlers(&canvas, game.clone());
        setup_play_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Tile Tap running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse taps
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.state.running() {
                    return;
                }
                let point = g.client_to_board(
                    &canvas_clone,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
                g.input.push_tap(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch taps
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    if !g.state.running() {
                        return;
                    }
                    let point = g.client_to_board(
                        &canvas_clone,
                        f64::from(touch.client_x()),
                        f64::from(touch.client_y()),
                    );
                    g.input.push_tap(point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("playButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();

                let Some(profile) = g.profile.as_mut() else {
                    log::warn!("Play pressed before user data arrived");
                    return;
                };

                // Ticket gate: an empty balance blocks the round
                let remaining = match profile.spend_ticket() {
                    Ok(remaining) => remaining,
                    Err(e) => {
                        log::info!("Play rejected: {}", e);
                        if let Some(w) = web_sys::window() {
                            let _ = w.alert_with_message("No more tickets available!");
                        }
                        return;
                    }
                };

                let profile = profile.clone();
                update_balance_hud(&profile);

                // Persist the consumed ticket; failures are logged, the
                // round starts regardless.
                wasm_bindgen_futures::spawn_local(async move {
                    match backend::update_tickets(&profile.username, remaining).await {
                        Ok(resp) if resp.success => {}
                        Ok(resp) => log::warn!("Error updating tickets: {:?}", resp.error),
                        Err(e) => log::error!("Error updating tickets: {:?}", e),
                    }
                });

                set_hidden("startScreen", true);
                set_hidden("gameOver", true);

                let seed = js_sys::Date::now() as u64;
                g.restart(seed);
                g.last_phase = GamePhase::Running;
                log::info!("Round started with seed {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            set_text("score", &g.state.score.to_string());

            let phase = g.state.phase;
            if phase == GamePhase::GameOver && g.last_phase == GamePhase::Running {
                on_game_over(&mut g);
            }
            g.last_phase = phase;
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tile Tap (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: let the engine play itself into a loss
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use tile_tap::EngineConfig;
    use tile_tap::sim::{Board, GamePhase, GameState, TickInput, tick};

    let config = EngineConfig::load();
    let board = Board::new(400.0, 600.0, config.columns, config.vertical_gap);
    let mut state = GameState::new(42, board, config);
    state.start();

    let input = TickInput::default();
    let mut ticks = 0u32;
    while state.phase == GamePhase::Running && ticks < 100_000 {
        tick(&mut state, &input, 1.0 / 60.0);
        ticks += 1;
    }

    assert_eq!(state.phase, GamePhase::GameOver, "untapped round must end");
    println!(
        "✓ Smoke run: round ended after {} ticks at speed {:.3}",
        ticks, state.speed
    );
}
