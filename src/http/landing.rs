//! Landing page served at `/`.
//!
//! The page is rendered once from the registry at startup. Cards are built
//! client side so endpoints can use the origin the browser actually reached.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::{ServiceEntry, ServiceRegistry};

pub const CONTENT_TYPE: &str = "text/html;charset=UTF-8";

const SERVICES_PLACEHOLDER: &str = "__SERVICES_JSON__";

/// Pre-rendered landing page HTML.
#[derive(Debug, Clone)]
pub struct LandingPage {
    html: String,
}

impl LandingPage {
    pub fn render(registry: &ServiceRegistry) -> Self {
        let entries: Vec<&ServiceEntry> = registry.iter().collect();
        let json = match serde_json::to_string(&entries) {
            Ok(json) => escape_script(&json),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize service registry for landing page");
                "[]".to_string()
            }
        };
        Self {
            html: TEMPLATE.replace(SERVICES_PLACEHOLDER, &json),
        }
    }

    pub fn response(&self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CONTENT_TYPE)],
            self.html.clone(),
        )
            .into_response()
    }
}

/// Keep embedded JSON from closing the surrounding `<script>` element.
fn escape_script(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API Hub</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🚀</text></svg>">
    <style>
        :root {
            --bg: #f0f2f5;
            --card-bg: #ffffff;
            --text: #1a1a1a;
            --text-secondary: #666666;
            --border: #eaeaea;
            --primary: #0066ff;
        }
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, sans-serif;
            background: var(--bg);
            color: var(--text);
            min-height: 100vh;
        }
        .container { width: 100%; max-width: 1200px; margin: 0 auto; padding: 2rem; }
        .header { text-align: center; margin-bottom: 3rem; padding: 2rem 0 1rem; }
        .header h1 {
            font-size: 2.5rem;
            margin-bottom: 0.5rem;
            background: linear-gradient(120deg, #FF0080, #7928CA, #0066ff);
            -webkit-background-clip: text;
            background-clip: text;
            -webkit-text-fill-color: transparent;
            background-size: 200% auto;
            animation: gradient 8s ease infinite;
        }
        @keyframes gradient {
            0% { background-position: 0% 50%; }
            50% { background-position: 100% 50%; }
            100% { background-position: 0% 50%; }
        }
        .header p { color: var(--text-secondary); font-size: 1.1rem; }
        .grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
            gap: 1.5rem;
        }
        @keyframes fadeInUp {
            from { opacity: 0; transform: translateY(20px); }
            to { opacity: 1; transform: translateY(0); }
        }
        .card {
            background: var(--card-bg);
            border: 1px solid var(--border);
            border-radius: 16px;
            padding: 1.5rem;
            transition: all 0.3s ease;
            box-shadow: 0 8px 24px rgba(0, 0, 0, 0.12);
            animation: fadeInUp 0.6s ease backwards;
            animation-delay: calc(var(--order) * 0.2s);
        }
        .card:hover { transform: translateY(-5px); box-shadow: 0 12px 36px rgba(0, 0, 0, 0.16); }
        .card-header { display: flex; align-items: center; gap: 0.75rem; margin-bottom: 1rem; }
        .logo { font-size: 2rem; }
        .title { font-size: 1.25rem; font-weight: 600; }
        .description { color: var(--text-secondary); margin-bottom: 1rem; font-size: 0.9rem; }
        .endpoint {
            font-family: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace;
            font-size: 0.875rem;
            padding: 0.75rem;
            border-radius: 8px;
            background: #2f3542;
            color: #f1f2f6;
            margin: 1rem 0;
            word-break: break-all;
        }
        .endpoint::before { content: '$ '; opacity: 0.6; color: #a4b0be; }
        .copy-btn {
            width: 100%;
            padding: 0.75rem;
            border: none;
            border-radius: 12px;
            background: var(--primary);
            color: white;
            font-weight: 500;
            cursor: pointer;
            transition: all 0.2s ease;
        }
        .copy-btn:hover { opacity: 0.9; transform: translateY(-2px); }
        .toast {
            position: fixed;
            bottom: 2rem;
            left: 50%;
            transform: translateX(-50%);
            background: rgba(0, 0, 0, 0.8);
            color: white;
            padding: 0.75rem 1.5rem;
            border-radius: 100px;
            font-size: 0.875rem;
            opacity: 0;
            transition: opacity 0.3s ease;
        }
        @media (max-width: 640px) {
            .container { padding: 1rem; }
            .header { padding: 1rem 0; }
            .header h1 { font-size: 2rem; }
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>API Proxy Hub</h1>
            <p>One endpoint for every API</p>
        </div>
        <div class="grid" id="api-grid"></div>
    </div>
    <div id="toast" class="toast">Copied to clipboard</div>
    <script>
        const SERVICES = __SERVICES_JSON__;

        function endpointFor(service) {
            return service.direct_url
                ? `https://${service.host}`
                : `${window.location.origin}/${service.key}/`;
        }

        function showToast() {
            const toast = document.getElementById('toast');
            toast.style.opacity = '1';
            setTimeout(() => { toast.style.opacity = '0'; }, 2000);
        }

        function copyEndpoint(endpoint) {
            navigator.clipboard.writeText(endpoint).then(showToast).catch(() => {
                const textArea = document.createElement('textarea');
                textArea.value = endpoint;
                document.body.appendChild(textArea);
                textArea.select();
                document.execCommand('copy');
                document.body.removeChild(textArea);
                showToast();
            });
        }

        const grid = document.getElementById('api-grid');
        SERVICES.forEach((service, index) => {
            const card = document.createElement('div');
            card.className = 'card';
            card.style.setProperty('--order', index + 1);

            const header = document.createElement('div');
            header.className = 'card-header';
            const logo = document.createElement('span');
            logo.className = 'logo';
            logo.textContent = service.logo;
            const title = document.createElement('span');
            title.className = 'title';
            title.textContent = service.key.toUpperCase();
            header.append(logo, title);

            const description = document.createElement('div');
            description.className = 'description';
            description.textContent = service.description;

            const endpoint = document.createElement('div');
            endpoint.className = 'endpoint';
            endpoint.textContent = endpointFor(service);

            const button = document.createElement('button');
            button.className = 'copy-btn';
            button.textContent = 'Copy';
            button.addEventListener('click', () => copyEndpoint(endpointFor(service)));

            card.append(header, description, endpoint, button);
            grid.appendChild(card);
        });
    </script>
</body>
</html>
"##;
