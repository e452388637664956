//! Modules, imports and help

use super::bind;
use crate::lisp::scope::Scope;
use crate::lisp::value::{Builtin, Value};

const MODULE_NAME: &str = ":module:name";
const MODULE_EXPORTS: &str = ":module:exports";

const SUMMARY: &str = include_str!("../../../resources/help/en/summary.txt");

/// Bundled help pages, keyed by operator name
const HELP_PAGES: &[(&str, &str)] = &[
    ("def", include_str!("../../../resources/help/en/def.txt")),
    ("lambda", include_str!("../../../resources/help/en/lambda.txt")),
    ("if", include_str!("../../../resources/help/en/if.txt")),
    ("cond", include_str!("../../../resources/help/en/cond.txt")),
    ("roll", include_str!("../../../resources/help/en/roll.txt")),
    ("module", include_str!("../../../resources/help/en/module.txt")),
    ("import", include_str!("../../../resources/help/en/import.txt")),
    ("host/send", include_str!("../../../resources/help/en/host_send.txt")),
];

/// Look up the bundled help page for `name`
pub fn help_page(name: &str) -> Option<&'static str> {
    HELP_PAGES
        .iter()
        .find(|(page, _)| *page == name)
        .map(|(_, text)| *text)
}

pub(super) fn register(scope: &Scope) {
    bind(
        scope,
        Builtin::form("module", |args, _, scope| {
            let [name, exports] = args else {
                return Value::error("module requires two arguments. module name and exported tokens");
            };
            if !matches!(name, Value::Atom(_)) {
                return Value::error("module requires a module name");
            }
            if !matches!(exports, Value::List(_)) {
                return Value::error("module requires a export list");
            }
            scope.set(Value::atom(MODULE_NAME), name.clone());
            scope.set(Value::atom(MODULE_EXPORTS), exports.clone());
            name.clone()
        }),
    );

    bind(
        scope,
        Builtin::function("import", |args, interp, scope| {
            let (path, alias) = match args {
                [Value::Text(path)] => (path, None),
                [Value::Text(path), Value::Atom(alias)] => (path, Some(alias.as_str())),
                _ => return Value::error("import requires a text argument and a atom"),
            };

            let full_path = interp.import_dir().join(path);
            let source = match std::fs::read_to_string(&full_path) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(path = %full_path.display(), error = %e, "import failed");
                    return Value::error(format!("import failed: {}", e));
                }
            };

            let module_scope = interp.create_scope();
            interp.eval_source(&source, &module_scope);

            let module = match (alias, module_scope.lookup(&Value::atom(MODULE_NAME))) {
                (Some(alias), _) => alias.to_string(),
                (None, Some(Value::Atom(name))) => name,
                _ => return Value::error("import failed: module name missing"),
            };
            let Some(Value::List(exports)) = module_scope.lookup(&Value::atom(MODULE_EXPORTS)) else {
                return Value::error("import failed: module exports missing");
            };

            for export in &exports {
                if let Value::Atom(symbol) = export {
                    let qualified = Value::atom(format!("{}/{}", module, symbol));
                    scope.set(qualified, module_scope.find(export));
                }
            }

            tracing::info!(path = %full_path.display(), module = %module, exports = exports.len(), "imported module");
            Value::text("loaded")
        }),
    );

    bind(
        scope,
        Builtin::function("help", |args, _, _| match args {
            [Value::Text(name)] => Value::text(help_page(name).unwrap_or(SUMMARY)),
            _ => Value::text(SUMMARY),
        }),
    );
}
