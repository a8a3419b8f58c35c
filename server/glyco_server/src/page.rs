//! The manual-testing form served at `GET /`.

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Diabetes Risk Prediction</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 640px; margin: 40px auto; padding: 20px; background: #fafafa; color: #262730; }
    h1 { text-align: center; }
    form { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; background: #fff; border: 1px solid #e0e0e0; border-radius: 8px; padding: 20px; }
    label { display: block; font-weight: 600; margin-bottom: 4px; }
    input, select { width: 100%; padding: 8px; box-sizing: border-box; border: 1px solid #ccc; border-radius: 4px; }
    button { grid-column: span 2; padding: 10px; border: none; border-radius: 6px; background: #0083ff; color: #fff; cursor: pointer; }
    #result { margin-top: 20px; padding: 14px; border-radius: 6px; text-align: center; font-weight: bold; }
    .yes { background: #ffe6e6; color: #d60000; }
    .no { background: #e6ffea; color: #007a00; }
  </style>
</head>
<body>
  <h1>Diabetes Risk Prediction</h1>
  <form id="predictForm">
    <div><label for="age">Age</label><input type="number" id="age" min="1" max="120" step="1" value="30" required></div>
    <div><label for="gender">Gender</label><select id="gender" required>{{GENDER_OPTIONS}}</select></div>
    <div><label for="hba1c">HbA1c (%)</label><input type="number" id="hba1c" min="0" max="20" step="0.1" value="5.0" required></div>
    <div><label for="bmi">BMI</label><input type="number" id="bmi" min="10" max="60" step="0.1" value="25.0" required></div>
    <div><label for="chol">Cholesterol (mg/dL)</label><input type="number" id="chol" min="50" max="600" step="1" value="180" required></div>
    <div><label for="tg">Triglycerides (mg/dL)</label><input type="number" id="tg" min="10" max="2000" step="1" value="150" required></div>
    <button type="submit">Predict</button>
  </form>
  <div id="result"></div>
  <script>
    const form = document.getElementById('predictForm');
    const resultDiv = document.getElementById('result');
    const num = (id) => parseFloat(document.getElementById(id).value);

    form.addEventListener('submit', async (e) => {
      e.preventDefault();
      resultDiv.textContent = '...';
      resultDiv.className = '';
      const data = {
        age: parseInt(document.getElementById('age').value, 10),
        gender: document.getElementById('gender').value,
        hba1c: num('hba1c'),
        bmi: num('bmi'),
        chol: num('chol'),
        tg: num('tg'),
      };
      try {
        const res = await fetch('/predict', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(data),
        });
        const json = await res.json();
        if (json.error) throw new Error(json.error);
        resultDiv.textContent = `${json.message} (Confidence: ${json.confidence}%)`;
        resultDiv.className = json.result === 'Yes' ? 'yes' : 'no';
      } catch (err) {
        resultDiv.textContent = 'Error: ' + err.message;
      }
    });
  </script>
</body>
</html>
"#;

/// Render the form with one `<option>` per gender class.
pub fn render_form(gender_options: &[String]) -> String {
    let options: String = gender_options
        .iter()
        .map(|opt| {
            let opt = escape_html(opt);
            format!(r#"<option value="{opt}">{opt}</option>"#)
        })
        .collect();
    TEMPLATE.replace("{{GENDER_OPTIONS}}", &options)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
