//! Static guidance shown to the operator.

use crate::platform::Platform;

/// Title of the manual native-engine install block.
pub const MANUAL_INSTALL_TITLE: &str = "Tesseract OCR installation";

/// How to install the native OCR engine by hand on `platform`.
pub fn manual_install(platform: Platform, manual_url: &str) -> Vec<String> {
    let mut lines = match platform {
        Platform::Windows => vec![
            "Windows:".to_string(),
            format!("1. Download Tesseract from: {}", manual_url),
            "2. Install the .exe file".to_string(),
            "3. Add Tesseract to your PATH environment variable".to_string(),
            "   Usually: C:\\Program Files\\Tesseract-OCR".to_string(),
            "4. Restart your terminal/command prompt".to_string(),
        ],
        Platform::MacOS => vec![
            "macOS:".to_string(),
            "1. Install using Homebrew:".to_string(),
            "   brew install tesseract".to_string(),
            "2. Or download from: https://github.com/tesseract-ocr/tesseract".to_string(),
        ],
        Platform::Linux => vec![
            "Ubuntu/Debian:".to_string(),
            "  sudo apt-get update".to_string(),
            "  sudo apt-get install tesseract-ocr".to_string(),
            String::new(),
            "CentOS/RHEL:".to_string(),
            "  sudo yum install tesseract".to_string(),
            String::new(),
            "Fedora:".to_string(),
            "  sudo dnf install tesseract".to_string(),
        ],
    };
    lines.push(String::new());
    lines.push("Make sure Tesseract is accessible from the command line:".to_string());
    lines.push("  tesseract --version".to_string());
    lines
}

/// Fallback steps when the bootstrap could not install the engine itself.
pub fn installer_fallback(manual_url: &str) -> Vec<String> {
    vec![
        format!("1. Download Tesseract from: {}", manual_url),
        "2. Run the installer".to_string(),
        "3. Make sure to add Tesseract to PATH during installation".to_string(),
    ]
}

/// What to do in the installer wizard.
pub fn installer_wizard() -> Vec<String> {
    vec![
        "1. Accept the license agreement".to_string(),
        "2. Choose installation directory (default is fine)".to_string(),
        "3. Make sure 'Add Tesseract to PATH' is checked".to_string(),
        "4. Complete the installation".to_string(),
    ]
}

/// One-line install hint per OS, used by the verifier.
pub fn binary_hints(manual_url: &str) -> Vec<String> {
    vec![
        format!("Windows: Download from {}", manual_url),
        "macOS: brew install tesseract".to_string(),
        "Linux: sudo apt-get install tesseract-ocr".to_string(),
    ]
}

/// Next steps after an install run.
pub fn next_steps(platform: Platform, env_file: &str, key: &str) -> Vec<String> {
    let mut steps = Vec::new();
    if platform.is_windows() {
        steps.push("Restart your terminal/command prompt".to_string());
    }
    steps.push(format!("Set up your OpenAI API key in a {} file:", env_file));
    steps.push(format!("   {}=your_api_key_here", key));
    steps.push("Check the environment:".to_string());
    steps.push("   scanready verify".to_string());
    steps.push("Run the application:".to_string());
    steps.push("   streamlit run main.py".to_string());
    number_steps(steps)
}

/// Next steps after the quick fix.
pub fn fix_next_steps(env_file: &str) -> Vec<String> {
    vec![
        format!("1. Make sure your OpenAI API key is set in the {} file", env_file),
        "2. Run the application: streamlit run main.py".to_string(),
        "3. Upload your scanned PDF; it will now use GPT Vision".to_string(),
    ]
}

/// What the quick fix changed.
pub fn fix_changes() -> Vec<String> {
    vec![
        "✓ Removed PaddleOCR and EasyOCR (dependency conflicts)".to_string(),
        "✓ Fixed protobuf version conflicts".to_string(),
        "✓ Now using GPT-4 Vision for OCR".to_string(),
        "✓ Tesseract still available as fallback".to_string(),
    ]
}

/// What the converter does with the environment just prepared.
pub fn capability_notes(platform: Platform) -> (&'static str, Vec<String>) {
    if platform.is_windows() {
        (
            "The application on Windows uses",
            vec![
                "GPT-4 Vision API for primary OCR".to_string(),
                "Tesseract as fallback (if installed)".to_string(),
                "No local OCR engines, so no protobuf conflicts".to_string(),
            ],
        )
    } else {
        (
            "The application supports",
            vec![
                "Regular PDF text extraction".to_string(),
                "Scanned PDF OCR with multiple engines".to_string(),
                "GPT-4o and GPT-4o-mini models".to_string(),
                "Automatic text file saving".to_string(),
            ],
        )
    }
}

/// Banner recommending cloud vision on Windows.
pub fn windows_recommendation() -> Vec<String> {
    vec![
        "For Windows, GPT-4 Vision is the recommended OCR path.".to_string(),
        "It avoids the local OCR engines' dependency conflicts.".to_string(),
    ]
}

fn number_steps(steps: Vec<String>) -> Vec<String> {
    let mut n = 0;
    steps
        .into_iter()
        .map(|s| {
            if s.starts_with(' ') {
                s
            } else {
                n += 1;
                format!("{}. {}", n, s)
            }
        })
        .collect()
}
