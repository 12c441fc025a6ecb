//! Editing session: the state machine, assistant and event log working together.
//!
//! [`EditorSession`] is what a front end drives. It forwards pointer events to
//! [`InputState`], drains the resulting semantic events into the CSV journal,
//! and runs the suggestion engine automatically whenever a shape is committed.
//! Log failures are returned to the caller only after all in-memory state has
//! been updated, so a broken log destination never loses a stroke.

use crate::assistant::{Catalogue, Suggestion, SuggestionContext, SuggestionId, TriggerKind, propose};
use crate::config::Config;
use crate::draw::{Frame, ShapeId, ShapeKind, ShapeOrigin, ShapeStyle};
use crate::eventlog::{EventFields, EventLog, EventLogError, ExperimentContext};
use crate::input::{InputState, MouseButton, Tool};
use std::collections::HashSet;

/// Owned editor state for one user session.
pub struct EditorSession {
    input: InputState,
    catalogue: Catalogue,
    event_log: Option<EventLog>,
    context: ExperimentContext,
    auto_suppressed: HashSet<SuggestionId>,
    current_suggestion: Option<Suggestion>,
    auto_suggest: bool,
}

impl EditorSession {
    /// Creates a session with the built-in catalogue and no event log.
    pub fn new(style: ShapeStyle, hit_tolerance: f64) -> Self {
        Self {
            input: InputState::with_defaults(style, hit_tolerance),
            catalogue: Catalogue::builtin(),
            event_log: None,
            context: ExperimentContext::default(),
            auto_suppressed: HashSet::new(),
            current_suggestion: None,
            auto_suggest: true,
        }
    }

    /// Creates a session using the drawing and assistant settings of `config`.
    ///
    /// The event log is attached separately with [`EditorSession::open_log`].
    pub fn from_config(config: &Config) -> Self {
        let mut session = Self::new(config.shape_style(), config.drawing.hit_tolerance);
        session.auto_suggest = config.assistant.auto_suggest;
        session
    }

    pub fn with_catalogue(mut self, catalogue: Catalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    pub fn set_auto_suggest(&mut self, enabled: bool) {
        self.auto_suggest = enabled;
    }

    /// Attaches `log` and writes a `session_start` record.
    ///
    /// Context set on the session so far is applied to the log first. The log
    /// stays attached even if that first write fails.
    pub fn open_log(&mut self, mut log: EventLog) -> Result<(), EventLogError> {
        log.set_context(
            self.context.condition.as_deref(),
            self.context.task_id.as_deref(),
            self.context.trial_index,
        );
        log::info!(
            "Logging session {} to {}",
            log.session_id(),
            log.path().display()
        );
        self.event_log = Some(log);
        self.record("session_start", &EventFields::new().tool(self.current_tool().name()))
    }

    pub fn event_log(&self) -> Option<&EventLog> {
        self.event_log.as_ref()
    }

    /// Updates the experiment context stamped on later records.
    ///
    /// `None` arguments leave the field unchanged. Applies to a log attached
    /// later as well.
    pub fn set_experiment_context(
        &mut self,
        condition: Option<&str>,
        task_id: Option<&str>,
        trial_index: Option<u32>,
    ) {
        if let Some(condition) = condition {
            self.context.condition = Some(condition.to_string());
        }
        if let Some(task_id) = task_id {
            self.context.task_id = Some(task_id.to_string());
        }
        if let Some(trial_index) = trial_index {
            self.context.trial_index = Some(trial_index);
        }
        if let Some(log) = self.event_log.as_mut() {
            log.set_context(condition, task_id, trial_index);
        }
    }

    pub fn experiment_context(&self) -> &ExperimentContext {
        &self.context
    }

    pub fn current_tool(&self) -> Tool {
        self.input.active_tool()
    }

    pub fn set_tool(&mut self, tool: Tool) -> Result<(), EventLogError> {
        self.input.set_tool(tool);
        self.flush_events()
    }

    pub fn shapes(&self) -> &Frame {
        &self.input.frame
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn current_suggestion(&self) -> Option<&Suggestion> {
        self.current_suggestion.as_ref()
    }

    pub fn is_auto_suppressed(&self, id: SuggestionId) -> bool {
        self.auto_suppressed.contains(&id)
    }

    /// Forwards a pointer press. Returns whether the press did anything.
    pub fn on_press(&mut self, button: MouseButton, x: f64, y: f64) -> Result<bool, EventLogError> {
        let handled = self.input.on_mouse_press(button, x, y);
        self.after_input().map(|()| handled)
    }

    pub fn on_motion(&mut self, x: f64, y: f64) -> Result<bool, EventLogError> {
        let handled = self.input.on_mouse_motion(x, y);
        self.after_input().map(|()| handled)
    }

    pub fn on_release(&mut self, button: MouseButton, x: f64, y: f64) -> Result<bool, EventLogError> {
        let handled = self.input.on_mouse_release(button, x, y);
        self.after_input().map(|()| handled)
    }

    /// Asks the assistant for help explicitly.
    ///
    /// Replaces the pending suggestion with the result, including with nothing
    /// when the engine abstains.
    pub fn request_suggestion(&mut self) -> Result<Option<SuggestionId>, EventLogError> {
        let ctx = self.suggestion_context(TriggerKind::Manual, None);
        self.current_suggestion = propose(&ctx);
        match self.current_suggestion.clone() {
            Some(suggestion) => {
                self.record("suggestion_shown", &suggestion_fields(&suggestion, TriggerKind::Manual))?;
                Ok(Some(suggestion.id))
            }
            None => {
                log::debug!("Assistant abstained on manual request");
                self.record(
                    "suggestion_abstain",
                    &EventFields::new().notes(format!("trigger={}", TriggerKind::Manual.as_str())),
                )?;
                Ok(None)
            }
        }
    }

    /// Applies the pending suggestion to the most recent shape it fits.
    ///
    /// Returns the ids of the added shapes; empty when nothing was pending or
    /// the target shape no longer exists.
    pub fn accept_suggestion(&mut self) -> Result<Vec<ShapeId>, EventLogError> {
        let Some(suggestion) = self.current_suggestion.take() else {
            return Ok(Vec::new());
        };
        let Some(template) = self.catalogue.get(suggestion.template) else {
            log::warn!("Template '{}' is not in the catalogue", suggestion.template);
            return Ok(Vec::new());
        };
        let Some(target) = self
            .input
            .frame
            .latest_user_kind(template.target_kind())
            .map(|item| item.shape.bounding_box())
        else {
            log::warn!(
                "No {} left to attach '{}' to; dropping suggestion",
                template.target_kind(),
                suggestion.template
            );
            return Ok(Vec::new());
        };

        let shapes = template.instantiate(&target, self.input.style);
        let origin = ShapeOrigin::Template(suggestion.template);
        let added: Vec<ShapeId> = shapes
            .into_iter()
            .map(|shape| self.input.frame.add_shape(shape, origin))
            .collect();
        log::info!("Applied {} ({} shapes)", suggestion.id, added.len());

        let fields = EventFields::new()
            .item_type(suggestion.template.to_string())
            .point_count(added.len())
            .notes(format!("id={}", suggestion.id));
        self.record("suggestion_accepted", &fields)?;
        Ok(added)
    }

    /// Rejects the pending suggestion and stops offering it automatically.
    pub fn dismiss_suggestion(&mut self) -> Result<Option<SuggestionId>, EventLogError> {
        let Some(suggestion) = self.current_suggestion.take() else {
            return Ok(None);
        };
        self.auto_suppressed.insert(suggestion.id);
        log::info!("Dismissed {}; no longer offered automatically", suggestion.id);

        let fields = EventFields::new()
            .item_type(suggestion.template.to_string())
            .notes(format!("id={}", suggestion.id));
        self.record("suggestion_dismissed", &fields)?;
        Ok(Some(suggestion.id))
    }

    fn suggestion_context(&self, trigger: TriggerKind, created_kind: Option<ShapeKind>) -> SuggestionContext {
        SuggestionContext::from_frame(&self.input.frame, trigger, created_kind, &self.auto_suppressed)
    }

    fn after_input(&mut self) -> Result<(), EventLogError> {
        let result = self.flush_events();
        match self.input.take_committed() {
            Some(kind) if self.auto_suggest => result.and(self.auto_suggest_for(kind)),
            _ => result,
        }
    }

    fn auto_suggest_for(&mut self, kind: ShapeKind) -> Result<(), EventLogError> {
        let ctx = self.suggestion_context(TriggerKind::Auto, Some(kind));
        let Some(suggestion) = propose(&ctx) else {
            return Ok(());
        };
        log::debug!("Auto suggestion {} after {kind}", suggestion.id);
        let fields = suggestion_fields(&suggestion, TriggerKind::Auto);
        self.current_suggestion = Some(suggestion);
        self.record("suggestion_shown", &fields)
    }

    fn flush_events(&mut self) -> Result<(), EventLogError> {
        let mut result = Ok(());
        for event in self.input.take_events() {
            result = result.and(self.record(&event.event_type, &event.fields));
        }
        result
    }

    fn record(&mut self, event_type: &str, fields: &EventFields) -> Result<(), EventLogError> {
        match self.event_log.as_mut() {
            Some(log) => log.record(event_type, fields),
            None => Ok(()),
        }
    }
}

fn suggestion_fields(suggestion: &Suggestion, trigger: TriggerKind) -> EventFields {
    EventFields::new()
        .item_type(suggestion.template.to_string())
        .notes(format!(
            "id={};trigger={};uncertainty={}",
            suggestion.id,
            trigger.as_str(),
            suggestion.uncertainty
        ))
}
