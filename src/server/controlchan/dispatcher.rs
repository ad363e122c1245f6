//! Routes commands to their handlers and turns handler failures into replies.

use super::{
    command::Command,
    handler::{CommandContext, CommandHandler},
};
use crate::server::{
    environment::Environment,
    error::{CommandErrorKind, DispatchError},
    session::Session,
};
use std::{collections::HashMap, sync::Arc};

/// Maps verbs to handlers. Names are case insensitive.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        CommandRegistry::default()
    }

    /// Registers `handler` for `name`, replacing any handler registered before.
    pub fn register<H>(&mut self, name: &str, handler: H)
    where
        H: CommandHandler + 'static,
    {
        self.register_shared(name, Arc::new(handler));
    }

    /// Registers one handler instance under `name`, e.g. for an alias such as `XCWD`.
    pub fn register_shared(&mut self, name: &str, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(name.to_uppercase(), handler);
    }

    /// The handler of `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(&name.to_uppercase()).cloned()
    }

    /// Returns true if a handler is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.to_uppercase())
    }

    /// The registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Dispatches commands of any number of sessions. Apart from its registry and environment, which
/// never change, it holds no state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    environment: Option<Arc<Environment>>,
}

impl Dispatcher {
    /// Creates a dispatcher. Fake mode handlers need an `environment`.
    pub fn new(registry: CommandRegistry, environment: Option<Environment>) -> Self {
        Dispatcher {
            registry: Arc::new(registry),
            environment: environment.map(Arc::new),
        }
    }

    /// The handlers.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The fake mode collaborators, if any.
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_deref()
    }

    /// Runs the handler of `cmd` against `session`.
    ///
    /// Client errors, including an unknown verb, are answered with a reply and leave the session
    /// usable. Only fatal errors are returned; the connection should then be closed.
    #[tracing_attributes::instrument(skip(self, session))]
    pub fn dispatch(&self, cmd: &Command, session: &mut Session) -> Result<(), DispatchError> {
        slog::debug!(session.log(), "Processing command"; "command" => %cmd);
        let result = match self.registry.get(cmd.name()) {
            Some(handler) => handler.handle(CommandContext {
                cmd,
                session: &mut *session,
                environment: self.environment.as_deref(),
            }),
            None => Err(CommandErrorKind::CommandNotImplemented(cmd.name().to_string()).into()),
        };

        match result {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => {
                slog::error!(session.log(), "Command failed fatally"; "command" => cmd.name(), "error" => %err.kind());
                Err(DispatchError::new(cmd.name(), err))
            }
            Err(err) => {
                slog::info!(session.log(), "Command rejected"; "command" => cmd.name(), "reason" => %err.kind());
                let (code, key, args) = err.reply();
                session.send_reply(code, key, &args).map_err(|e| DispatchError::new(cmd.name(), e))
            }
        }
    }
}
