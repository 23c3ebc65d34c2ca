//! Inline stylesheet and script embedded in every report.

pub const STYLE: &str = r#"
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 0;
            background-color: #f4f4f4;
            color: #333;
        }
        .container {
            width: 80%;
            margin: auto;
            overflow: hidden;
        }
        header {
            background: #35424a;
            color: #ffffff;
            padding: 10px 0;
            text-align: center;
        }
        header h1 {
            margin: 0;
        }
        header a {
            color: #ffffff;
        }
        .app-icon {
            max-width: 100px;
            margin: 20px auto;
            display: block;
            border: 1px solid #e0e5eb;
            border-radius: 25%;
        }
        .facts {
            display: flex;
            flex-wrap: wrap;
            justify-content: center;
            gap: 10px 30px;
            list-style-type: none;
            padding: 0;
        }
        .pros-cons {
            display: flex;
            justify-content: space-between;
            margin-top: 20px;
        }
        .pros-cons div {
            background: #ffffff;
            padding: 20px;
            box-shadow: 0 0 10px rgba(0, 0, 0, 0.1);
            width: 45%;
        }
        .pros-cons h2 {
            margin-top: 0px;
        }
        ul {
            list-style-type: none;
            padding: 0;
        }
        li {
            margin: 5px 0;
        }
        .screenshots {
            margin-top: 20px;
            text-align: center;
        }
        .screenshots img {
            max-width: 200px;
            margin: 0 10px;
        }
        .review {
            background: #ffffff;
            padding: 12px 16px;
            margin: 10px 0;
            box-shadow: 0 0 6px rgba(0, 0, 0, 0.08);
        }
        .review-meta {
            color: #777;
            font-size: 0.9em;
        }
        .stars {
            color: #e6a100;
        }
        .translate {
            border: 1px solid #35424a;
            background: #ffffff;
            border-radius: 4px;
            cursor: pointer;
        }
        footer {
            background: #35424a;
            color: #ffffff;
            text-align: center;
            padding: 10px 0;
            margin-top: 20px;
        }
"#;

pub const SCRIPT: &str = r#"
        function translateText(text) {
            const url = 'https://translate.google.com/?sl=auto&tl=en&op=translate&text='
                + encodeURIComponent(text);
            window.open(url, '_blank');
        }
        function translateReview(button) {
            const title = button.dataset.title || '';
            const text = button.dataset.text || '';
            translateText(title ? title + '\n\n' + text : text);
        }
"#;
