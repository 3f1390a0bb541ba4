//! The single-page form.
//!
//! Rendered server-side: a plain `<form>` post blocks the page until the
//! answer is back, which is all the interaction model needs.

use axum::{Form, extract::State, response::Html};
use serde::Deserialize;

use super::AppState;
use crate::orchestrator::Reply;
use crate::persona::Persona;

#[derive(Deserialize)]
pub(super) struct AskForm {
    #[serde(default)]
    persona: String,
    #[serde(default)]
    text: String,
}

/// GET /
pub(super) async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.app_name, Persona::RECOGNIZED[0], "", None))
}

/// POST /ask
pub(super) async fn ask(State(state): State<AppState>, Form(form): Form<AskForm>) -> Html<String> {
    let reply = state.orchestrator.ask(&form.persona, &form.text).await;
    let selected = match Persona::from_label(&form.persona) {
        Persona::Generalist => Persona::RECOGNIZED[0],
        p => p,
    };
    Html(render_page(&state.app_name, selected, &form.text, Some(&reply)))
}

const STYLE: &str = r#"
    *, *::before, *::after { box-sizing: border-box; }
    body {
      font-family: system-ui, -apple-system, sans-serif;
      background: #0f0f0f; color: #e0e0e0;
      max-width: 46rem; margin: 2rem auto; padding: 0 1rem;
    }
    h1 { font-size: 1.5rem; }
    h3, h4 { margin-bottom: 0.4rem; }
    .overview { color: #aaa; font-size: 0.9rem; }
    fieldset { border: 1px solid #333; border-radius: 8px; margin: 1rem 0; }
    label.persona { margin-right: 1rem; }
    textarea {
      width: 100%; height: 120px; padding: 0.5rem;
      background: #1a1a1a; color: #e0e0e0;
      border: 1px solid #333; border-radius: 8px;
    }
    button {
      margin-top: 0.5rem; padding: 0.5rem 1.5rem;
      border: 0; border-radius: 8px; background: #2a2a3a; color: #c0c0e0;
    }
    button:disabled { opacity: 0.5; }
    .answer { white-space: pre-wrap; background: #1a1a1a; padding: 1rem; border-radius: 8px; }
    .notice { background: #1a2a3a; padding: 0.75rem 1rem; border-radius: 8px; }
    .error  { background: #3a1a1a; color: #f0b0b0; padding: 0.75rem 1rem; border-radius: 8px; }
"#;

fn render_page(app_name: &str, selected: Persona, text: &str, reply: Option<&Reply>) -> String {
    let radios: String = Persona::RECOGNIZED
        .into_iter()
        .map(|p| {
            let checked = if p == selected { " checked" } else { "" };
            format!(
                r#"<label class="persona"><input type="radio" name="persona" value="{slug}" data-label="{label}"{checked}> {label}</label>"#,
                slug = p.slug(),
                label = p.label(),
            )
        })
        .collect();

    let result = match reply {
        None => String::new(),
        Some(Reply::MissingCredential) => {
            format!(r#"<div class="error">{}</div>"#, escape(&Reply::MissingCredential.text()))
        }
        Some(r @ Reply::EmptyInput) => format!(r#"<div class="notice">{}</div>"#, escape(&r.text())),
        Some(r @ Reply::Answer(_)) => {
            format!(r#"<h4>回答</h4><div class="answer">{}</div>"#, escape(&r.text()))
        }
    };

    format!(
        r#"<!doctype html>
<html lang="ja">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
  <h1>専門家LLMアプリ（専門家選択付き）</h1>
  <div class="overview">
    <h3>アプリ概要</h3>
    <p>テキストを入力し、専門家の種類を選んで送信すると、その分野の専門家としてLLMが回答します。</p>
    <h3>操作方法</h3>
    <ol>
      <li>下のラジオボタンで「専門家の種類」を選択</li>
      <li>テキストエリアに質問や文章を入力</li>
      <li>「送信」ボタンをクリックすると回答が表示されます</li>
    </ol>
  </div>
  <form id="ask-form" method="post" action="/ask">
    <fieldset>
      <legend>専門家の種類を選んでください:</legend>
      {radios}
    </fieldset>
    <label for="text">テキストを入力してください:</label>
    <textarea id="text" name="text">{text}</textarea>
    <button id="submit" type="submit">送信</button>
    <span id="status"></span>
  </form>
  {result}
  <script>
    document.getElementById("ask-form").addEventListener("submit", function () {{
      var picked = document.querySelector('input[name="persona"]:checked');
      document.getElementById("submit").disabled = true;
      document.getElementById("status").textContent =
        (picked ? picked.dataset.label : "専門家") + "として回答中...";
    }});
  </script>
</body>
</html>
"#,
        title = escape(app_name),
        text = escape(text),
    )
}

/// Minimal HTML text escaping for values placed in element bodies and
/// double-quoted attributes.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
