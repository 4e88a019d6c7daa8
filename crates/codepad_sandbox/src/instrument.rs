use crate::RunId;

const SCRIPT_HEAD: &str = "var __padRun = ";

const SCRIPT_BODY: &str = r#";
function __padPost(msg) {
    msg.run = __padRun;
    window.parent.postMessage(msg, '*');
}
function __padShow(arg) {
    return typeof arg === 'object' ? JSON.stringify(arg) : String(arg);
}
var __padLog = console.log;
var __padWarn = console.warn;
var __padError = console.error;
console.log = function(...args) {
    __padPost({ type: 'console', method: 'log', args: args.map(__padShow) });
    __padLog.apply(console, args);
};
console.warn = function(...args) {
    __padPost({ type: 'console', method: 'warn', args: args.map(__padShow) });
    __padWarn.apply(console, args);
};
console.error = function(...args) {
    __padPost({ type: 'console', method: 'error', args: args.map(__padShow) });
    __padError.apply(console, args);
};
window.onerror = function(message, source, lineno, colno, error) {
    __padPost({
        type: 'error',
        message: String(message),
        source: source,
        line: lineno,
        column: colno,
        stack: error && error.stack
    });
    return true;
};
"#;

/// The script injected ahead of the user's JavaScript. It wraps the three
/// console entry points (each call still reaches the native console), installs
/// the global error handler, and stamps every outgoing payload with `run_id`
/// so the host can discard events from superseded runs.
pub fn instrumentation(run_id: RunId) -> String {
    let run = run_id.to_string();
    let mut script = String::with_capacity(SCRIPT_HEAD.len() + run.len() + SCRIPT_BODY.len());
    script.push_str(SCRIPT_HEAD);
    script.push_str(&run);
    script.push_str(SCRIPT_BODY);
    script
}
