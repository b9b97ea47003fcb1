//! The generator page.

use axum::response::Html;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Custom QR Code Generator</title>
    <style>
        *, *:before, *:after { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            background: #f4f6f8;
            color: #1f2933;
        }
        header {
            background: linear-gradient(135deg, #1a365d 0%, #2d4a6f 100%);
            color: white;
            padding: 20px 40px;
        }
        header h1 { margin: 0; font-size: 1.5rem; font-weight: 600; }
        main {
            display: flex;
            flex-wrap: wrap;
            gap: 32px;
            padding: 32px 40px;
        }
        form, .preview {
            background: white;
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0,0,0,.12);
            padding: 24px;
        }
        form { flex: 1 1 320px; max-width: 480px; }
        .preview { flex: 1 1 320px; text-align: center; }
        label { display: block; font-weight: 600; margin: 16px 0 6px; }
        textarea { width: 100%; min-height: 96px; padding: 8px; font: inherit; }
        input[type=color] { width: 64px; height: 36px; border: none; padding: 0; }
        button {
            margin-top: 24px;
            padding: 10px 20px;
            border: none;
            border-radius: 4px;
            background: #2d4a6f;
            color: white;
            font-size: 1rem;
            cursor: pointer;
        }
        button:disabled { opacity: .6; cursor: wait; }
        #qr-image { max-width: 100%; image-rendering: pixelated; display: none; }
        #download { display: none; margin-top: 16px; }
        #error { color: #b42318; margin-top: 16px; min-height: 1.2em; }
    </style>
</head>
<body>
    <header><h1>Custom QR Code Generator</h1></header>
    <main>
        <form id="qr-form">
            <label for="text">Enter text or URL</label>
            <textarea id="text" name="text" placeholder="https://example.com"></textarea>

            <label for="fill_color">QR code color</label>
            <input type="color" id="fill_color" name="fill_color" value="#000000">

            <label for="back_color">Background color</label>
            <input type="color" id="back_color" name="back_color" value="#ffffff">

            <label for="logo">Optional logo (PNG with transparency)</label>
            <input type="file" id="logo" name="logo" accept="image/*">

            <div><button type="submit" id="generate">Generate QR Code</button></div>
            <div id="error" role="alert"></div>
        </form>
        <section class="preview">
            <img id="qr-image" alt="Generated QR code">
            <div><a id="download" href="#" download>Download QR Code</a></div>
        </section>
    </main>
    <script>
        const form = document.getElementById('qr-form');
        const button = document.getElementById('generate');
        const image = document.getElementById('qr-image');
        const download = document.getElementById('download');
        const errorBox = document.getElementById('error');
        let previewUrl = null;

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            errorBox.textContent = '';
            button.disabled = true;
            try {
                const response = await fetch('/api/qr', { method: 'POST', body: new FormData(form) });
                if (!response.ok) {
                    let message = response.statusText;
                    try {
                        const body = await response.json();
                        message = body.message || message;
                    } catch (_) {}
                    throw new Error(message);
                }
                const blob = await response.blob();
                if (previewUrl) URL.revokeObjectURL(previewUrl);
                previewUrl = URL.createObjectURL(blob);
                image.src = previewUrl;
                image.style.display = 'inline-block';

                const url = response.headers.get('X-Download-Url');
                if (url) {
                    download.href = url;
                    download.style.display = 'inline-block';
                }
            } catch (err) {
                errorBox.textContent = err.message;
            } finally {
                button.disabled = false;
            }
        });
    </script>
</body>
</html>
"##;

/// GET / - Generator form
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
