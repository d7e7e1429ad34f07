//! Game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `EntireGameStateInfo` (plus the held keys, the frame timestamp in
//! milliseconds and an RNG handle where needed) and returns a brand-new
//! `EntireGameStateInfo`.  Side effects are limited to the injected RNG.
//!
//! Internally each step mutates a private working copy so that `tick` can run
//! the whole frame on a single clone.

use rand::Rng;

use crate::config::Config;
use crate::entities::{
    Entity, EntityKind, EntireGameStateInfo, GameSession, GameStatus, PendingEffect, Rect,
};
use crate::input::{Action, InputState, Key};
use crate::scene::Scene;
use crate::utils::{has_collision, number_to_px, random_between};
use crate::wizard::Wizard;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the idle (pre-start) state: hidden wizard at the start position,
/// empty scene, no loop scheduled.
pub fn init_state(config: Config) -> EntireGameStateInfo {
    let wizard = Wizard::at(config.wizard_start_x, config.wizard_start_y, &config);
    EntireGameStateInfo {
        wizard,
        scene: Scene::default(),
        session: GameSession::default(),
        score: 0,
        status: GameStatus::Idle,
        frame: 0,
        config,
    }
}

fn new_session(config: &Config) -> GameSession {
    GameSession {
        loop_id: Some(1),
        next_render_queue: Vec::new(),
        last_fireball_timestamp: None,
        last_cloud_timestamp: 0,
        cloud_interval: config.cloud_spawn_interval,
        last_bug_timestamp: 0,
    }
}

// ── Session state machine ────────────────────────────────────────────────────

/// Start control: replace the session, zero the score, reset and reveal the
/// wizard, and schedule the first frame.
pub fn start(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    let config = &state.config;
    let mut wizard = Wizard::at(config.wizard_start_x, config.wizard_start_y, config);
    wizard.visible = true;

    log::info!(
        "Session started, wizard at ({}, {})",
        number_to_px(wizard.x()),
        number_to_px(wizard.y())
    );

    let mut next = EntireGameStateInfo {
        wizard,
        session: new_session(config),
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        ..state.clone()
    };
    next.scene.clear();
    next
}

/// Cancel the scheduled frame and enter the terminal state.
pub fn game_over(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    let mut next = state.clone();
    end_session(&mut next);
    next
}

fn end_session(state: &mut EntireGameStateInfo) {
    if state.status == GameStatus::Over {
        return;
    }
    state.session.loop_id = None;
    state.status = GameStatus::Over;
    log::info!("Game over at frame {} with score {}", state.frame, state.score);
}

/// True while a next frame is scheduled.
pub fn is_running(state: &EntireGameStateInfo) -> bool {
    state.status == GameStatus::Running && state.session.loop_id.is_some()
}

// ── Input-driven state transitions ──────────────────────────────────────────

/// Run the action of every held key once.
pub fn process_pressed_keys(
    state: &EntireGameStateInfo,
    input: &InputState,
    timestamp: u64,
) -> EntireGameStateInfo {
    let mut next = state.clone();
    dispatch_keys(&mut next, input, timestamp);
    next
}

fn dispatch_keys(state: &mut EntireGameStateInfo, input: &InputState, timestamp: u64) {
    for action in input.actions() {
        apply_action(state, action, timestamp);
    }
}

fn apply_action(state: &mut EntireGameStateInfo, action: Action, timestamp: u64) {
    let step = state.config.speed * state.config.wizard_moving_multiplier;
    let (x, y) = (state.wizard.x(), state.wizard.y());
    match action {
        Action::MoveUp => state.wizard.set_y(y - step, &state.config),
        Action::MoveDown => state.wizard.set_y(y + step, &state.config),
        Action::MoveLeft => state.wizard.set_x(x - step, &state.config),
        Action::MoveRight => state.wizard.set_x(x + step, &state.config),
        Action::Fire => fire_fireball(state, timestamp),
    }
}

/// Fire a fireball ahead of the wizard, unless already firing or still
/// inside the cooldown window.
pub fn fire(state: &EntireGameStateInfo, timestamp: u64) -> EntireGameStateInfo {
    let mut next = state.clone();
    fire_fireball(&mut next, timestamp);
    next
}

fn fire_fireball(state: &mut EntireGameStateInfo, timestamp: u64) {
    if state.wizard.firing {
        return;
    }
    if let Some(last) = state.session.last_fireball_timestamp {
        if timestamp.saturating_sub(last) < state.config.fire_interval {
            return;
        }
    }

    let x = state.wizard.x() + state.config.fireball_offset_x;
    let y = state.wizard.y();
    state.scene.spawn(EntityKind::Fireball, x, y);
    state.session.last_fireball_timestamp = Some(timestamp);
    state.wizard.firing = true;
    state
        .session
        .next_render_queue
        .push(PendingEffect::ClearFiringState);
}

// ── Per-frame subsystems ────────────────────────────────────────────────────

/// Pull the wizard down by `speed` unless it already stands on the floor.
pub fn apply_gravity(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    let mut next = state.clone();
    fall(&mut next);
    next
}

fn fall(state: &mut EntireGameStateInfo) {
    if !state.wizard.is_on_floor(&state.config) {
        let y = state.wizard.y() + state.config.speed;
        state.wizard.set_y(y, &state.config);
    }
}

/// Run every pending effect; keep only those that have not completed.
pub fn process_next_render_queue(
    state: &EntireGameStateInfo,
    input: &InputState,
) -> EntireGameStateInfo {
    let mut next = state.clone();
    run_pending_effects(&mut next, input);
    next
}

fn run_pending_effects(state: &mut EntireGameStateInfo, input: &InputState) {
    let queue = std::mem::take(&mut state.session.next_render_queue);
    let remaining: Vec<PendingEffect> = queue
        .into_iter()
        .filter(|effect| !apply_effect(state, effect, input))
        .collect();
    state.session.next_render_queue = remaining;
}

/// Returns true once the effect has completed.
fn apply_effect(state: &mut EntireGameStateInfo, effect: &PendingEffect, input: &InputState) -> bool {
    match effect {
        PendingEffect::ClearFiringState => {
            if input.is_held(&Key::Space) {
                return false;
            }
            state.wizard.firing = false;
            true
        }
    }
}

/// Move fireballs right; drop any whose right edge reaches the area bound.
pub fn process_fireballs(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    let mut next = state.clone();
    advance_fireballs(&mut next);
    next
}

fn advance_fireballs(state: &mut EntireGameStateInfo) {
    let step = state.config.speed * state.config.fireball_moving_multiplier;
    let width = state.config.fireball_width;
    let bound = state.config.area_width;
    state.scene.fireballs = state
        .scene
        .fireballs
        .iter()
        .filter_map(|f| {
            let new_x = f.x + step;
            if new_x + width >= bound {
                None
            } else {
                Some(Entity { x: new_x, ..f.clone() })
            }
        })
        .collect();
}

// ── Spawn-and-advance (clouds & bugs) ───────────────────────────────────────

/// What a per-entity processor did with an entity this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Processed {
    /// Not handled: apply the normal leftward advance.
    Advance,
    /// Handled, and the entity is gone.
    Destroyed,
    /// Handled, the entity stays where it is.
    Hold,
}

type Processor = fn(&mut EntireGameStateInfo, &Entity) -> Processed;

/// Parameters of one drifting entity kind.
struct SpawnRule {
    kind: EntityKind,
    /// `None` stops new spawns; live entities still advance.
    interval: Option<u64>,
    last_spawn: fn(&mut GameSession) -> &mut u64,
    processor: Option<Processor>,
}

/// Spawn a new entity off the right edge when the interval has elapsed, then
/// advance every live entity of the kind. Returns true if one was spawned.
fn spawn_and_advance(
    state: &mut EntireGameStateInfo,
    rule: &SpawnRule,
    timestamp: u64,
    rng: &mut impl Rng,
) -> bool {
    let size = state.config.size_of(&rule.kind);
    let last = *(rule.last_spawn)(&mut state.session);
    let spawned = rule
        .interval
        .is_some_and(|interval| timestamp.saturating_sub(last) > interval);
    if spawned {
        let x = state.config.area_width + size.width;
        let y = random_between(rng, 0, state.config.area_height - size.height);
        state.scene.spawn(rule.kind.clone(), x, y);
        *(rule.last_spawn)(&mut state.session) = timestamp;
    }

    let live = std::mem::take(state.scene.of_kind_mut(&rule.kind));
    let mut kept = Vec::with_capacity(live.len());
    for entity in live {
        let outcome = match rule.processor {
            Some(process) => process(state, &entity),
            None => Processed::Advance,
        };
        match outcome {
            Processed::Destroyed => {}
            Processed::Hold => kept.push(entity),
            Processed::Advance => {
                let new_x = entity.x - state.config.speed;
                if new_x + size.width >= 0 {
                    kept.push(Entity { x: new_x, ..entity });
                }
            }
        }
    }
    *state.scene.of_kind_mut(&rule.kind) = kept;

    spawned
}

fn last_cloud_slot(session: &mut GameSession) -> &mut u64 {
    &mut session.last_cloud_timestamp
}

fn last_bug_slot(session: &mut GameSession) -> &mut u64 {
    &mut session.last_bug_timestamp
}

/// Decorative clouds: spawn on a jittered interval and drift left. A zero
/// `cloud_spawn_interval` turns spawning off.
pub fn process_clouds(
    state: &EntireGameStateInfo,
    timestamp: u64,
    rng: &mut impl Rng,
) -> EntireGameStateInfo {
    let mut next = state.clone();
    drift_clouds(&mut next, timestamp, rng);
    next
}

fn drift_clouds(state: &mut EntireGameStateInfo, timestamp: u64, rng: &mut impl Rng) {
    let rule = SpawnRule {
        kind: EntityKind::Cloud,
        interval: (state.config.cloud_spawn_interval > 0)
            .then_some(state.session.cloud_interval),
        last_spawn: last_cloud_slot,
        processor: None,
    };
    if spawn_and_advance(state, &rule, timestamp, rng) {
        let max_jitter = state.config.cloud_spawn_jitter;
        let jitter = if max_jitter > 0 { rng.gen_range(0..max_jitter) } else { 0 };
        state.session.cloud_interval = state.config.cloud_spawn_interval + jitter;
    }
}

/// Bugs: spawn on a fixed interval, collide with fireballs and the wizard,
/// drift left otherwise.
pub fn process_bugs(
    state: &EntireGameStateInfo,
    timestamp: u64,
    rng: &mut impl Rng,
) -> EntireGameStateInfo {
    let mut next = state.clone();
    drift_bugs(&mut next, timestamp, rng);
    next
}

fn drift_bugs(state: &mut EntireGameStateInfo, timestamp: u64, rng: &mut impl Rng) {
    let rule = SpawnRule {
        kind: EntityKind::Bug,
        interval: Some(state.config.bug_spawn_interval),
        last_spawn: last_bug_slot,
        processor: Some(bug_collision),
    };
    spawn_and_advance(state, &rule, timestamp, rng);
}

fn bug_collision(state: &mut EntireGameStateInfo, bug: &Entity) -> Processed {
    let bug_box = Rect::new(bug.x, bug.y, state.config.size_of(&EntityKind::Bug));
    let fireball_size = state.config.size_of(&EntityKind::Fireball);

    let hit = state
        .scene
        .fireballs
        .iter()
        .position(|f| has_collision(&Rect::new(f.x, f.y, fireball_size), &bug_box));
    if let Some(index) = hit {
        state.scene.fireballs.remove(index);
        state.score += state.config.bug_kill_score;
        log::info!("Bug destroyed at ({}, {}), score {}", bug.x, bug.y, state.score);
        return Processed::Destroyed;
    }

    if has_collision(&bug_box, &state.wizard.bounds(&state.config)) {
        end_session(state);
        return Processed::Hold;
    }

    Processed::Advance
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

/// Advance the session by one frame.  Does nothing unless a frame is
/// scheduled.  The next frame is scheduled before any subsystem runs, then
/// the subsystems run in fixed order and the tick score is added last.
pub fn tick(
    state: &EntireGameStateInfo,
    input: &InputState,
    timestamp: u64,
    rng: &mut impl Rng,
) -> EntireGameStateInfo {
    if !is_running(state) {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;
    next.session.loop_id = Some(next.frame + 1);

    dispatch_keys(&mut next, input, timestamp);
    fall(&mut next);
    run_pending_effects(&mut next, input);
    advance_fireballs(&mut next);
    drift_clouds(&mut next, timestamp, rng);
    drift_bugs(&mut next, timestamp, rng);

    next.score += 1;
    next
}
