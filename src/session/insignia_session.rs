use crate::{
    foundation::{
        core::{Generation, Millis},
        error::{GlyphError, GlyphResult},
    },
    render::{
        markup::scene_to_markup,
        organic::{RenderOptions, run_surface_task},
        raster::rasterize_png,
        reconcile::reconcile,
        surface::{Surface, SurfaceTask},
        timeline::{TaskId, Timeline},
    },
    scene::{builder::build_scene, model::Scene},
    seed::{palette::PaletteMode, params::GenerationParams, text::TextStats},
    session::opts::SessionOpts,
};

pub const PLACEHOLDER_TEXT: &str = "Type a phrase in the corner and grow a symbol from it.";

const MSG_GROWING: &str = "Growing...";
const MSG_GROWN: &str = "Insignia grown. Use SVG or PNG to export.";
const MSG_NO_TEXT: &str = "Add some text first to grow an insignia.";
const MSG_NO_SCENE: &str = "Generate an insignia before exporting.";
const MSG_SVG_DONE: &str = "SVG exported.";
const MSG_PNG_FAILED: &str = "Could not render PNG from SVG.";

/// One-line status shown next to the controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

/// Counters over the lifetime of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Scene builds that ran.
    pub builds: u64,
    pub cold_starts: u64,
    pub reconciles: u64,
    /// Pending live edits replaced by a newer one before their debounce elapsed.
    pub superseded_inputs: u64,
    /// Surface tasks dropped because their generation was no longer current.
    pub stale_tasks: u64,
}

/// Everything derived from the text currently on display.
#[derive(Clone, Debug)]
pub struct Generated {
    pub text: String,
    pub params: GenerationParams,
    pub scene: Scene,
    pub markup: String,
}

/// A file ready to be written or downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Work queued on the session clock.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionTask {
    /// Debounced live edit.
    Regenerate { text: String, mode: PaletteMode },
    Surface(SurfaceTask),
}

impl From<SurfaceTask> for SessionTask {
    fn from(t: SurfaceTask) -> Self {
        Self::Surface(t)
    }
}

/// Owns the generation state between the text input and the live surface.
///
/// All time is virtual: nothing scheduled runs until [`advance`](Self::advance) or
/// [`run_until_idle`](Self::run_until_idle) moves the clock.
#[derive(Debug)]
pub struct InsigniaSession {
    opts: SessionOpts,
    mode: PaletteMode,
    generation: Generation,
    current: Option<Generated>,
    timeline: Timeline<SessionTask>,
    surface: Option<Surface>,
    pending_input: Option<TaskId>,
    status: Status,
    stats: SessionStats,
}

impl Default for InsigniaSession {
    fn default() -> Self {
        Self::new(SessionOpts::default())
    }
}

impl InsigniaSession {
    /// New session in the empty state, with a surface attached.
    pub fn new(opts: SessionOpts) -> Self {
        let mut surface = Surface::new();
        surface.show_placeholder(PLACEHOLDER_TEXT);
        Self {
            opts,
            mode: PaletteMode::Auto,
            generation: Generation::default(),
            current: None,
            timeline: Timeline::new(),
            surface: Some(surface),
            pending_input: None,
            status: Status::default(),
            stats: SessionStats::default(),
        }
    }

    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    pub fn mode(&self) -> PaletteMode {
        self.mode
    }

    /// Palette mode used by later live edits and "generate now".
    pub fn set_mode(&mut self, mode: PaletteMode) {
        self.mode = mode;
    }

    /// Full pipeline for `text`: derive, build, then reconcile the surface against what it shows.
    ///
    /// Blank text resets to the empty state and returns `None`.
    #[tracing::instrument(skip(self, opts), fields(generation))]
    pub fn render_from_text(
        &mut self,
        text: &str,
        mode: PaletteMode,
        opts: &RenderOptions,
    ) -> Option<&GenerationParams> {
        if text.trim().is_empty() {
            self.reset();
            return None;
        }

        let params = GenerationParams::derive(text, mode);
        let scene = build_scene(&params);
        self.stats.builds += 1;
        let markup = scene_to_markup(&scene);

        self.begin_generation();
        tracing::Span::current().record("generation", self.generation.0);

        let previous = self.current.as_ref().map(|g| &g.scene);
        let outcome = reconcile(
            self.surface.as_mut(),
            &mut self.timeline,
            self.generation,
            previous,
            &scene,
            opts,
            &self.opts.transitions,
        );
        match outcome {
            Some(s) if s.cold_start => self.stats.cold_starts += 1,
            Some(_) => self.stats.reconciles += 1,
            None => tracing::debug!("no surface attached, skipping render"),
        }

        self.set_status(MSG_GROWN, false);
        let generated = self.current.insert(Generated {
            text: text.to_owned(),
            params,
            scene,
            markup,
        });
        Some(&generated.params)
    }

    /// Start a new generation and drop surface work queued for older ones.
    fn begin_generation(&mut self) {
        self.generation = self.generation.next();
        let current = self.generation;
        let dropped = self.timeline.retain(|t| match t {
            SessionTask::Surface(s) => s.generation() == current,
            SessionTask::Regenerate { .. } => true,
        });
        if dropped > 0 {
            tracing::trace!(dropped, "cancelled superseded surface tasks");
        }
    }

    fn reset(&mut self) {
        self.begin_generation();
        if let Some(surface) = self.surface.as_mut() {
            surface.show_placeholder(PLACEHOLDER_TEXT);
        }
        self.current = None;
        self.status = Status::default();
    }

    fn set_status(&mut self, message: &str, is_error: bool) {
        self.status = Status {
            message: message.to_owned(),
            is_error,
        };
    }

    /// Live edit. Regenerates once `debounce_ms` passes without another edit.
    pub fn input(&mut self, text: &str) {
        if let Some(id) = self.pending_input.take()
            && self.timeline.cancel(id).is_some()
        {
            self.stats.superseded_inputs += 1;
        }
        let id = self.timeline.schedule_after(
            Millis(self.opts.debounce_ms.max(0.0)),
            SessionTask::Regenerate {
                text: text.to_owned(),
                mode: self.mode,
            },
        );
        self.pending_input = Some(id);
    }

    /// Explicit trigger: render immediately with the cold pacing.
    pub fn generate_now(&mut self, text: &str) -> GlyphResult<&GenerationParams> {
        let text = text.trim();
        if text.is_empty() {
            self.set_status(MSG_NO_TEXT, true);
            return Err(GlyphError::validation(MSG_NO_TEXT));
        }
        self.set_status(MSG_GROWING, false);
        let opts = self.opts.cold.clone();
        self.render_from_text(text, self.mode, &opts)
            .ok_or_else(|| GlyphError::validation(MSG_NO_TEXT))
    }

    fn run_task(&mut self, task: SessionTask) {
        match task {
            SessionTask::Regenerate { text, mode } => {
                self.pending_input = None;
                let text = text.trim();
                if text.is_empty() {
                    self.reset();
                    return;
                }
                self.set_status(MSG_GROWING, false);
                let opts = self.opts.live.clone();
                self.render_from_text(text, mode, &opts);
            }
            SessionTask::Surface(t) => {
                if t.generation() != self.generation {
                    self.stats.stale_tasks += 1;
                }
                run_surface_task(
                    self.surface.as_mut(),
                    &mut self.timeline,
                    self.generation,
                    t,
                );
            }
        }
    }

    fn run_until(&mut self, until: Millis) -> usize {
        let mut ran = 0;
        while let Some((_, task)) = self.timeline.pop_due(until) {
            self.run_task(task);
            ran += 1;
        }
        self.timeline.set_now(until);
        ran
    }

    /// Move the clock forward by `by`, running everything that falls due. Returns the number of
    /// tasks run.
    pub fn advance(&mut self, by: Millis) -> usize {
        let until = self.timeline.now() + by;
        self.run_until(until)
    }

    /// Run until no task is pending.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(due) = self.timeline.next_due() {
            ran += self.run_until(due);
        }
        ran
    }

    /// Vector export of the current scene.
    pub fn export_svg(&mut self) -> GlyphResult<ExportArtifact> {
        let Some(g) = &self.current else {
            self.set_status(MSG_NO_SCENE, true);
            return Err(GlyphError::export(MSG_NO_SCENE));
        };
        let artifact = ExportArtifact {
            filename: g.params.svg_filename(),
            bytes: g.markup.clone().into_bytes(),
        };
        self.set_status(MSG_SVG_DONE, false);
        Ok(artifact)
    }

    /// Raster export of the current scene. `size` defaults to the configured export size.
    pub fn export_png(&mut self, size: Option<u32>) -> GlyphResult<ExportArtifact> {
        let Some(g) = &self.current else {
            self.set_status(MSG_NO_SCENE, true);
            return Err(GlyphError::export(MSG_NO_SCENE));
        };
        let size = size.unwrap_or(self.opts.default_export_size);
        match rasterize_png(&g.markup, size) {
            Ok(bytes) => {
                let artifact = ExportArtifact {
                    filename: g.params.png_filename(size),
                    bytes,
                };
                self.set_status(&format!("PNG exported at {size} × {size}."), false);
                Ok(artifact)
            }
            Err(err) => {
                tracing::warn!(error = %err, size, "png export failed");
                self.set_status(MSG_PNG_FAILED, true);
                Err(err)
            }
        }
    }

    /// Markup of what the surface shows right now, mid-transition included.
    pub fn frame_markup(&self) -> Option<String> {
        let surface = self.surface.as_ref()?;
        let frame = surface.frame_at(self.timeline.now(), &self.opts.transitions)?;
        Some(scene_to_markup(&frame))
    }

    /// Character-class summary of `text`, for the hint under the input.
    pub fn text_hint(text: &str) -> String {
        TextStats::analyse(text).hint()
    }

    pub fn current(&self) -> Option<&Generated> {
        self.current.as_ref()
    }

    pub fn params(&self) -> Option<&GenerationParams> {
        self.current.as_ref().map(|g| &g.params)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.current.as_ref().map(|g| &g.scene)
    }

    pub fn seed(&self) -> Option<u32> {
        self.params().map(|p| p.seed)
    }

    /// `Seed: 0x...`, absent in the empty state.
    pub fn seed_label(&self) -> Option<String> {
        self.params().map(|p| format!("Seed: {}", p.seed_hex()))
    }

    pub fn meta_tags(&self) -> Option<[String; 3]> {
        self.params().map(GenerationParams::meta_tags)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn now(&self) -> Millis {
        self.timeline.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.timeline.pending()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Attach a surface. The next render on it starts cold. Returns the previous one.
    pub fn attach_surface(&mut self, surface: Surface) -> Option<Surface> {
        self.surface.replace(surface)
    }

    pub fn detach_surface(&mut self) -> Option<Surface> {
        self.surface.take()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/insignia_session.rs"]
mod tests;
