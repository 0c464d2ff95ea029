//! Presentation output: the per-tick outbox, HUD change tracking, and the
//! `Presenter` seam that forwards a snapshot to the scene and HUD.

use skirmish_core::components::VisualHandle;
use skirmish_core::enums::EffectKind;
use skirmish_core::events::{
    AudioCue, EffectParams, GameEvent, HudReport, VisualCommand, VisualEffect,
};
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::Position;

/// Scene and HUD collaborator.
pub trait Presenter {
    fn spawn_visual_effect(
        &mut self,
        handle: VisualHandle,
        kind: EffectKind,
        position: Position,
        params: &EffectParams,
    );
    fn remove_visual(&mut self, handle: VisualHandle);
    fn report_health(&mut self, health: u32);
    fn report_ammo(&mut self, current: u32, reserve: u32);
    fn report_score(&mut self, score: u32);
}

/// Forward a snapshot's visual commands and HUD reports, in order.
pub fn dispatch<P: Presenter + ?Sized>(snapshot: &GameStateSnapshot, presenter: &mut P) {
    for command in &snapshot.visuals {
        match command {
            VisualCommand::Spawn { handle, effect } => {
                presenter.spawn_visual_effect(*handle, effect.kind, effect.position, &effect.params)
            }
            VisualCommand::Remove { handle } => presenter.remove_visual(*handle),
        }
    }
    for report in &snapshot.hud {
        match *report {
            HudReport::Health { health } => presenter.report_health(health),
            HudReport::Ammo { current, reserve } => presenter.report_ammo(current, reserve),
            HudReport::Score { score } => presenter.report_score(score),
        }
    }
}

/// Everything a tick emits, drained into the snapshot at the end of the tick.
#[derive(Debug, Default)]
pub struct Outbox {
    pub events: Vec<GameEvent>,
    pub audio: Vec<AudioCue>,
    pub visuals: Vec<VisualCommand>,
    next_handle: u64,
}

impl Outbox {
    /// Allocate a fresh scene handle. Handles are never reused within a session.
    pub fn allocate_handle(&mut self) -> VisualHandle {
        self.next_handle += 1;
        VisualHandle(self.next_handle)
    }

    /// Spawn an effect under a new handle.
    pub fn spawn_visual(
        &mut self,
        kind: EffectKind,
        position: Position,
        params: EffectParams,
    ) -> VisualHandle {
        let handle = self.allocate_handle();
        self.spawn_visual_with(handle, kind, position, params);
        handle
    }

    /// Spawn an effect under an existing handle.
    pub fn spawn_visual_with(
        &mut self,
        handle: VisualHandle,
        kind: EffectKind,
        position: Position,
        params: EffectParams,
    ) {
        self.visuals.push(VisualCommand::Spawn {
            handle,
            effect: VisualEffect {
                kind,
                position,
                params,
            },
        });
    }

    pub fn remove_visual(&mut self, handle: VisualHandle) {
        self.visuals.push(VisualCommand::Remove { handle });
    }

    pub fn audio(&mut self, cue: AudioCue) {
        self.audio.push(cue);
    }

    pub fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Remembers the last reported HUD values so only changes are emitted.
#[derive(Debug, Default)]
pub struct HudTracker {
    health: Option<u32>,
    ammo: Option<(u32, u32)>,
    score: Option<u32>,
}

impl HudTracker {
    pub fn collect(&mut self, health: u32, ammo: (u32, u32), score: u32) -> Vec<HudReport> {
        let mut reports = Vec::new();
        if self.health != Some(health) {
            self.health = Some(health);
            reports.push(HudReport::Health { health });
        }
        if self.ammo != Some(ammo) {
            self.ammo = Some(ammo);
            reports.push(HudReport::Ammo {
                current: ammo.0,
                reserve: ammo.1,
            });
        }
        if self.score != Some(score) {
            self.score = Some(score);
            reports.push(HudReport::Score { score });
        }
        reports
    }
}
