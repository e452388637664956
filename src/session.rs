//! Workbench session state
//!
//! A [`Session`] owns the interpreter, its scopes and the logs the terminal
//! UI renders. Lisp code talks back to the session through the `host/send`
//! builtin, which queues [`HostCommand`]s that the session applies after
//! each expression.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{DicelispError, Result};
use crate::lisp::{lex, parse_all, Builtin, Interpreter, Scope, Value};

/// Name of the root context
pub const ROOT_CONTEXT: &str = "/";

/// Entries kept in each of the history, output and console logs
pub const MAX_LOG_LINES: usize = 1000;

/// Lisp helpers defined on top of `host/send`
const PRELUDE: &str = "\
(def log (lambda (x) (host/send 'log' x)))
(def clear (lambda () (host/send 'clear')))
(def quit (lambda () (host/send 'quit')))
(def swap (lambda (x) (host/send 'setContext' x)))
(def open (lambda (x) (host/send 'open' x)))
";

/// A request from Lisp code to the workbench
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Stop the workbench
    Quit,
    /// Clear the output log
    Clear,
    /// Append a line to the console log
    Log(String),
    /// Switch the active scope to a named context
    SetContext(String),
    /// Open a file in an editor tab
    Open(PathBuf),
    /// Skip the echo and do nothing else
    Silence,
}

impl HostCommand {
    /// Whether a submission that issued this command should skip the echo
    pub fn is_silent(&self) -> bool {
        !matches!(self, Self::SetContext(_))
    }
}

type HostQueue = Rc<RefCell<VecDeque<HostCommand>>>;

/// Interpreter plus everything the workbench shows around it
pub struct Session {
    interpreter: Interpreter,
    root: Rc<Scope>,
    active: Rc<Scope>,
    active_name: String,
    contexts: HashMap<String, Rc<Scope>>,
    history: Vec<String>,
    output: Vec<String>,
    console: Vec<String>,
    open_requests: Vec<PathBuf>,
    running: bool,
    host: HostQueue,
}

impl Session {
    /// Create a session around `interpreter` with the host helpers installed
    pub fn new(interpreter: Interpreter) -> Self {
        let root = interpreter.create_scope();
        let host: HostQueue = Rc::default();
        root.define_atom("host/send", Value::Builtin(host_send(Rc::clone(&host))));

        for result in interpreter.eval_source(PRELUDE, &root) {
            if result.is_error() {
                tracing::error!(%result, "failed to install session helper");
            }
        }

        let mut contexts = HashMap::new();
        contexts.insert(ROOT_CONTEXT.to_string(), Rc::clone(&root));

        Self {
            interpreter,
            active: Rc::clone(&root),
            root,
            active_name: ROOT_CONTEXT.to_string(),
            contexts,
            history: Vec::new(),
            output: Vec::new(),
            console: Vec::new(),
            open_requests: Vec::new(),
            running: true,
            host,
        }
    }

    /// Evaluate every expression in `command`, echoing the last result to
    /// the output log.
    ///
    /// Returns the last result, or `None` for a blank line.
    pub fn submit(&mut self, command: &str) -> Option<Value> {
        push_capped(&mut self.history, command.to_string());
        tracing::debug!(command, context = %self.active_name, "submit");

        let exprs = parse_all(&lex(command));
        let mut last = None;
        let mut silent = false;

        for expr in &exprs {
            let result = self.interpreter.eval(expr, &self.active);
            silent = self.apply_host_commands();
            last = Some(result);
        }

        if let Some(result) = &last {
            if !silent {
                push_capped(&mut self.output, result.to_display_string());
            }
        }
        last
    }

    /// Evaluate a script file in the active context, returning each result
    pub fn run_file(&mut self, path: &Path) -> Result<Vec<Value>> {
        if !path.exists() {
            return Err(DicelispError::file_not_found(path));
        }
        let source = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "running script");

        let exprs = parse_all(&lex(&source));
        let mut results = Vec::with_capacity(exprs.len());
        for expr in &exprs {
            results.push(self.interpreter.eval(expr, &self.active));
            self.apply_host_commands();
        }
        Ok(results)
    }

    /// Apply queued host commands; true when any of them was silent
    fn apply_host_commands(&mut self) -> bool {
        let mut silent = false;
        loop {
            let next = self.host.borrow_mut().pop_front();
            let Some(command) = next else {
                break;
            };
            silent |= command.is_silent();
            tracing::debug!(?command, "host command");
            match command {
                HostCommand::Quit => self.running = false,
                HostCommand::Clear => self.output.clear(),
                HostCommand::Log(line) => push_capped(&mut self.console, line),
                HostCommand::SetContext(name) => self.set_context(&name),
                HostCommand::Open(path) => self.open_requests.push(path),
                HostCommand::Silence => {}
            }
        }
        silent
    }

    /// Make the named context active, creating it on first use
    pub fn set_context(&mut self, name: &str) {
        let root = &self.root;
        let scope = self
            .contexts
            .entry(name.to_string())
            .or_insert_with(|| root.child());
        self.active = Rc::clone(scope);
        self.active_name = name.to_string();
    }

    /// Name of the active context
    pub fn active_context(&self) -> &str {
        &self.active_name
    }

    /// The interpreter
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// The active scope
    pub fn scope(&self) -> &Rc<Scope> {
        &self.active
    }

    /// Submitted commands, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Echoed results, oldest first
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Lines written with `log`, oldest first
    pub fn console(&self) -> &[String] {
        &self.console
    }

    /// Append a line to the console log
    pub fn log(&mut self, line: impl Into<String>) {
        push_capped(&mut self.console, line.into());
    }

    /// Files Lisp code asked to open since the last call
    pub fn take_open_requests(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.open_requests)
    }

    /// Whether the session should keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the session
    pub fn shutdown(&mut self) {
        self.running = false;
    }
}

/// Append `line`, dropping the oldest entry past [`MAX_LOG_LINES`]
fn push_capped(log: &mut Vec<String>, line: String) {
    log.push(line);
    if log.len() > MAX_LOG_LINES {
        log.remove(0);
    }
}

/// The `host/send` builtin, feeding `queue`
fn host_send(queue: HostQueue) -> Builtin {
    Builtin::function("host/send", move |args, interp, _| {
        let Some((Value::Text(verb), rest)) = args.split_first() else {
            return Value::error("host/send requires a text command");
        };

        let command = match (verb.to_ascii_lowercase().as_str(), rest) {
            ("quit", _) => HostCommand::Quit,
            ("clear", _) => HostCommand::Clear,
            ("log", [value, ..]) => HostCommand::Log(value.to_display_string()),
            ("log", []) => HostCommand::Silence,
            ("setcontext", [key, ..]) => {
                let name = key.to_display_string();
                queue
                    .borrow_mut()
                    .push_back(HostCommand::SetContext(name.clone()));
                return Value::text(format!("Context set to {}", name));
            }
            ("setcontext", []) => return Value::error("setContext requires a context name"),
            ("open", [Value::Text(path), ..]) => HostCommand::Open(interp.import_dir().join(path)),
            ("open", _) => return Value::error("open requires a text path"),
            _ => return Value::error(format!("unknown host command '{}'", verb)),
        };

        queue.borrow_mut().push_back(command);
        Value::List(vec![])
    })
}
