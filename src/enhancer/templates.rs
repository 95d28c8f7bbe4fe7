//! Text blocks used by the enhancement engine and the embedded Web UI

/// Role guidance: injected as the opening section of every enhanced prompt.
pub const DEVELOPER_GUIDANCE: &str = "You are answering a software developer. \
Use precise technical language, name the language, framework, and versions involved, \
and prefer runnable code with error handling over pseudo-code.";

pub const DESIGNER_GUIDANCE: &str = "You are answering a designer. \
Describe the audience, platform, and visual tone, respect any existing design constraints, \
and give the rationale behind layout and styling decisions.";

pub const MARKETER_GUIDANCE: &str = "You are answering a marketer. \
Identify the target segment, the channel, and the desired call to action, \
and tie the copy to measurable goals.";

pub const CONTENT_CREATOR_GUIDANCE: &str = "You are answering a content creator. \
Fix the format, length, voice, and publication platform, \
and open with a hook and a structure outline before the full draft.";

pub const ANALYST_GUIDANCE: &str = "You are answering an analyst. \
Name the data sources, metrics, and comparison baselines, \
and state the methodology before drawing conclusions.";

pub const GENERAL_GUIDANCE: &str = "Keep the request self-contained. \
Spell out anything a reader without prior context would need to know.";

/// Quality-requirement sections, appended in order. The optimization level
/// decides how many of these make it into the enhanced prompt.
pub const QUALITY_SECTIONS: [(&str, &str); 6] = [
    (
        "Output format",
        "State the exact shape of the deliverable (list, table, code, prose) and roughly how long it should be.",
    ),
    (
        "Context",
        "List the relevant background, constraints, and assumptions instead of leaving them implied.",
    ),
    (
        "Structure",
        "Break multi-part work into numbered steps and address them in order.",
    ),
    (
        "Clarity",
        "Replace vague wording with concrete, measurable requirements.",
    ),
    (
        "Success criteria",
        "Spell out what a correct and complete answer must include.",
    ),
    (
        "Edge cases",
        "Note boundary conditions and say how ambiguity should be resolved.",
    ),
];

/// Appended when the original prompt contains fenced code blocks.
pub const CODE_PRESERVATION_NOTE: &str = "The task contains fenced code blocks (```). \
Treat them as samples and keep them exactly as written.";

/// Single-page Web UI served at `/`.
/// Talks to `POST /api/enhance` on the same origin.
pub const WEB_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Prompt Enhancer</title>
  <style>
    * {
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }

    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Helvetica Neue', sans-serif;
      background: #f5f5f5;
      min-height: 100vh;
      padding: 20px;
      display: flex;
      align-items: flex-start;
      justify-content: center;
    }

    .container {
      background: white;
      border-radius: 8px;
      box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
      border: 1px solid #e0e0e0;
      max-width: 900px;
      width: 100%;
      overflow: hidden;
    }

    .header {
      background: white;
      color: #333;
      padding: 30px;
      text-align: center;
      border-bottom: 1px solid #e0e0e0;
    }

    .header h1 {
      font-size: 24px;
      font-weight: 600;
      margin-bottom: 8px;
      color: #333;
    }

    .header p {
      font-size: 14px;
      color: #666;
    }

    .content {
      padding: 30px;
    }

    .section {
      margin-bottom: 25px;
    }

    .section-title {
      font-size: 14px;
      font-weight: 600;
      color: #333;
      margin-bottom: 10px;
      text-transform: uppercase;
      letter-spacing: 0.5px;
    }

    .row {
      display: flex;
      gap: 16px;
    }

    .row .section {
      flex: 1;
    }

    select {
      width: 100%;
      padding: 10px 12px;
      border: 1px solid #d0d0d0;
      border-radius: 6px;
      font-size: 14px;
      background: white;
      color: #333;
    }

    select:focus {
      outline: none;
      border-color: #888;
    }

    textarea {
      width: 100%;
      min-height: 160px;
      padding: 12px;
      border: 1px solid #d0d0d0;
      border-radius: 6px;
      font-size: 14px;
      font-family: inherit;
      resize: vertical;
      color: #333;
    }

    textarea:focus {
      outline: none;
      border-color: #888;
    }

    .char-count {
      text-align: right;
      font-size: 12px;
      color: #999;
      margin-top: 4px;
    }

    .btn {
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 8px;
      padding: 12px 24px;
      border: none;
      border-radius: 6px;
      font-size: 14px;
      font-weight: 600;
      cursor: pointer;
      width: 100%;
    }

    .btn-primary {
      background: #333;
      color: white;
    }

    .btn-primary:hover:not(:disabled) {
      background: #555;
    }

    .btn:disabled {
      opacity: 0.5;
      cursor: not-allowed;
    }

    .spinner {
      width: 16px;
      height: 16px;
      border: 2px solid rgba(255, 255, 255, 0.3);
      border-top-color: white;
      border-radius: 50%;
      animation: spin 0.8s linear infinite;
    }

    @keyframes spin {
      to { transform: rotate(360deg); }
    }

    .status {
      margin-top: 12px;
      padding: 10px 14px;
      border-radius: 6px;
      font-size: 14px;
      display: none;
    }

    .status.error {
      display: block;
      background: #f8d7da;
      color: #721c24;
    }

    .results {
      display: none;
      border-top: 1px solid #e0e0e0;
      margin-top: 10px;
      padding-top: 25px;
    }

    .results.active {
      display: block;
    }

    .prompt-output {
      background: #f8f8f8;
      border: 1px solid #e0e0e0;
      border-radius: 6px;
      padding: 16px;
      font-size: 14px;
      white-space: pre-wrap;
      word-break: break-word;
      max-height: 400px;
      overflow-y: auto;
      color: #333;
    }

    .output-meta {
      display: flex;
      justify-content: space-between;
      font-size: 12px;
      color: #999;
      margin-top: 6px;
    }

    .stats-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
      margin-top: 20px;
    }

    .stat-card {
      background: #f8f8f8;
      border: 1px solid #e0e0e0;
      border-radius: 6px;
      padding: 14px;
    }

    .stat-card .label {
      font-size: 12px;
      color: #666;
      margin-bottom: 4px;
    }

    .stat-card .value {
      font-size: 20px;
      font-weight: 600;
      color: #333;
    }

    details {
      margin-top: 20px;
      font-size: 13px;
      color: #555;
    }

    details summary {
      cursor: pointer;
      font-weight: 600;
      color: #333;
    }

    details pre {
      margin-top: 8px;
      background: #f8f8f8;
      border-radius: 6px;
      padding: 12px;
      white-space: pre-wrap;
    }

    .keyboard-hint {
      text-align: center;
      font-size: 12px;
      color: #999;
      margin-top: 16px;
    }

    kbd {
      background: #f0f0f0;
      border: 1px solid #d0d0d0;
      border-radius: 3px;
      padding: 1px 5px;
      font-size: 11px;
    }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Prompt Enhancer</h1>
      <p>Transform your prompts into professional instructions</p>
    </div>

    <div class="content">
      <div class="row">
        <div class="section">
          <div class="section-title">Your Role</div>
          <select id="userRole">
            <option value="developer">Developer</option>
            <option value="designer">Designer</option>
            <option value="marketer">Marketer</option>
            <option value="content_creator">Content Creator</option>
            <option value="analyst">Analyst</option>
            <option value="general" selected>General</option>
          </select>
        </div>

        <div class="section">
          <div class="section-title">Optimization Level</div>
          <select id="optimizationLevel">
            <option value="conservative">Conservative (100-150% expansion)</option>
            <option value="balanced" selected>Balanced (150-250% expansion)</option>
            <option value="aggressive">Aggressive (200-400% expansion)</option>
          </select>
        </div>
      </div>

      <div class="section">
        <div class="section-title">Original Prompt</div>
        <textarea id="promptText" placeholder="Enter your basic prompt here..."></textarea>
        <div class="char-count" id="charCount">0 chars</div>
      </div>

      <button id="enhanceBtn" class="btn btn-primary" onclick="enhancePrompt()">Enhance Prompt</button>

      <div id="status" class="status"></div>

      <div id="results" class="results">
        <div class="section-title">Enhanced Prompt</div>
        <div id="enhancedPrompt" class="prompt-output"></div>
        <div class="output-meta">
          <span id="outputChars"></span>
          <span id="outputTokens"></span>
        </div>

        <div class="stats-grid">
          <div class="stat-card">
            <div class="label">Enhancement Ratio</div>
            <div class="value" id="statRatio"></div>
          </div>
          <div class="stat-card">
            <div class="label">Processing Time</div>
            <div class="value" id="statTime"></div>
          </div>
          <div class="stat-card">
            <div class="label">Token Expansion</div>
            <div class="value" id="statExpansion"></div>
          </div>
          <div class="stat-card">
            <div class="label">Cost Impact</div>
            <div class="value" id="statCost"></div>
          </div>
        </div>

        <details>
          <summary>How this prompt was enhanced</summary>
          <pre id="thinkingProcess"></pre>
        </details>
      </div>

      <div class="keyboard-hint">
        Shortcut: <kbd>Ctrl</kbd> + <kbd>Enter</kbd> Enhance
      </div>
    </div>
  </div>

  <script>
    const promptText = document.getElementById('promptText');
    const charCount = document.getElementById('charCount');
    const enhanceBtn = document.getElementById('enhanceBtn');
    const results = document.getElementById('results');

    let inFlight = false;

    // Update character count
    function updateCharCount() {
      charCount.textContent = promptText.value.length + ' chars';
    }

    promptText.addEventListener('input', updateCharCount);

    // Keyboard shortcut
    document.addEventListener('keydown', (e) => {
      if ((e.ctrlKey || e.metaKey) && e.key === 'Enter') {
        e.preventDefault();
        enhancePrompt();
      }
    });

    function enhancePrompt() {
      const prompt = promptText.value;

      if (!prompt.trim()) {
        showError('Please enter a prompt to enhance.');
        return;
      }

      // One request at a time; a click while loading does nothing
      if (inFlight) {
        return;
      }
      inFlight = true;

      clearError();
      results.classList.remove('active');
      enhanceBtn.disabled = true;
      enhanceBtn.innerHTML = '<div class="spinner"></div> Enhancing...';

      fetch('/api/enhance', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
          original_prompt: prompt,
          user_role: document.getElementById('userRole').value,
          optimization_level: document.getElementById('optimizationLevel').value
        })
      })
      .then(r => r.json().then(data => ({ ok: r.ok, data: data })))
      .then(({ ok, data }) => {
        if (!ok || data.success === false) {
          throw new Error(data.error || 'Request failed');
        }
        renderResults(data);
      })
      .catch(() => {
        showError('Failed to enhance prompt. Please try again.');
      })
      .finally(() => {
        inFlight = false;
        enhanceBtn.disabled = false;
        enhanceBtn.textContent = 'Enhance Prompt';
      });
    }

    function renderResults(data) {
      document.getElementById('enhancedPrompt').textContent = data.enhanced_prompt;
      document.getElementById('outputChars').textContent = data.enhanced_prompt.length + ' characters';
      document.getElementById('outputTokens').textContent = '~' + data.enhanced_tokens + ' tokens';

      const ratio = data.original_tokens === 0
        ? 0
        : (data.enhanced_tokens / data.original_tokens) * 100;
      document.getElementById('statRatio').textContent = ratio.toFixed(1) + '%';
      document.getElementById('statTime').textContent = data.processing_time.toFixed(2) + 's';

      const expansion = data.enhanced_tokens - data.original_tokens;
      document.getElementById('statExpansion').textContent = (expansion >= 0 ? '+' : '') + expansion;

      const cost = data.cost_savings_usd;
      document.getElementById('statCost').textContent =
        (cost < 0 ? '-$' : '$') + Math.abs(cost).toFixed(6);

      document.getElementById('thinkingProcess').textContent = data.thinking_process;
      results.classList.add('active');
    }

    function showError(message) {
      const status = document.getElementById('status');
      status.textContent = message;
      status.className = 'status error';
    }

    function clearError() {
      const status = document.getElementById('status');
      status.textContent = '';
      status.className = 'status';
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_sections_have_unique_titles() {
        let mut titles: Vec<&str> = QUALITY_SECTIONS.iter().map(|(title, _)| *title).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), QUALITY_SECTIONS.len());
    }

    #[test]
    fn test_quality_sections_are_nonempty() {
        for (title, body) in QUALITY_SECTIONS {
            assert!(!title.is_empty());
            assert!(!body.is_empty());
        }
    }

    #[test]
    fn test_web_ui_contains_form_and_endpoint() {
        assert!(WEB_UI_HTML.contains("/api/enhance"));
        assert!(WEB_UI_HTML.contains("id=\"promptText\""));
        assert!(WEB_UI_HTML.contains("id=\"userRole\""));
        assert!(WEB_UI_HTML.contains("id=\"optimizationLevel\""));
    }

    #[test]
    fn test_web_ui_lists_all_roles_and_levels() {
        for value in [
            "developer",
            "designer",
            "marketer",
            "content_creator",
            "analyst",
            "general",
        ] {
            assert!(WEB_UI_HTML.contains(&format!("value=\"{}\"", value)));
        }
        for value in ["conservative", "balanced", "aggressive"] {
            assert!(WEB_UI_HTML.contains(&format!("value=\"{}\"", value)));
        }
    }

    #[test]
    fn test_web_ui_defaults_match_api_defaults() {
        assert!(WEB_UI_HTML.contains("value=\"general\" selected"));
        assert!(WEB_UI_HTML.contains("value=\"balanced\" selected"));
    }
}
