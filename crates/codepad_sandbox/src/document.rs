use crate::instrument;
use crate::RunId;

const DOC_OPEN: &str = "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"UTF-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
<title>Preview</title>\n\
<style>\n";

// Neutral defaults so an empty CSS buffer still renders readably; user CSS
// follows and can override everything.
const BASE_STYLES: &str = "body { margin: 0; padding: 16px; font-family: -apple-system, \
BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }\n";

const STYLE_CLOSE: &str = "</style>\n</head>\n<body>\n";

const SCRIPT_OPEN: &str = "\n<script>\n";

const GUARD_OPEN: &str = "try {\n";

// The guard covers synchronous top-level evaluation; window.onerror covers
// everything deferred. Both report through the same relay path.
const GUARD_CLOSE: &str = "\n} catch (error) {\n\
    __padPost({ type: 'error', message: error.message, stack: error.stack });\n\
}\n";

const DOC_CLOSE: &str = "</script>\n</body>\n</html>\n";

/// Assembles the standalone preview document for one run: user CSS inside the
/// style block, user HTML as body content, then the instrumentation script
/// followed by the user script inside a guarded block.
///
/// All three buffers are embedded verbatim. The document is self-authored by
/// the same user who views it, so nothing is escaped; this function is pure
/// templating and cannot fail.
pub fn assemble(html: &str, css: &str, javascript: &str, run_id: RunId) -> String {
    let instrumentation = instrument::instrumentation(run_id);
    let capacity = DOC_OPEN.len()
        + BASE_STYLES.len()
        + css.len()
        + STYLE_CLOSE.len()
        + html.len()
        + SCRIPT_OPEN.len()
        + instrumentation.len()
        + GUARD_OPEN.len()
        + javascript.len()
        + GUARD_CLOSE.len()
        + DOC_CLOSE.len()
        + 2;

    let mut doc = String::with_capacity(capacity);
    doc.push_str(DOC_OPEN);
    doc.push_str(BASE_STYLES);
    doc.push_str(css);
    doc.push('\n');
    doc.push_str(STYLE_CLOSE);
    doc.push_str(html);
    doc.push_str(SCRIPT_OPEN);
    doc.push_str(&instrumentation);
    doc.push_str(GUARD_OPEN);
    doc.push_str(javascript);
    doc.push_str(GUARD_CLOSE);
    doc.push_str(DOC_CLOSE);
    doc
}
