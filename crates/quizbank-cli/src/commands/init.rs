//! The `quizbank init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizbank.toml
    if std::path::Path::new("quizbank.toml").exists() {
        println!("quizbank.toml already exists, skipping.");
    } else {
        std::fs::write("quizbank.toml", SAMPLE_CONFIG)?;
        println!("Created quizbank.toml");
    }

    // Create example topic file
    std::fs::create_dir_all("data")?;
    let example_path = std::path::Path::new("data/topic_01_example.json");
    if example_path.exists() {
        println!("data/topic_01_example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TOPIC)?;
        println!("Created data/topic_01_example.json");
    }

    println!("\nNext steps:");
    println!("  1. Drop your topic_*.json files into data/");
    println!("  2. Run: quizbank combine --data-dir data --output questions.json");
    println!("  3. Run: quizbank run --corpus questions.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizbank configuration

[rebalance]
# Stop once at most this fraction of single-choice questions has the
# correct option as the strictly longest one.
target_ratio = 0.4
max_passes = 3
# Incorrect options may trail the correct option by up to this many chars.
slack = 40

[enrich]
# Explanations shorter than this get the full topic context block.
length_threshold = 150

[shuffle]
seed = 42

# Uncomment to replace the built-in relevance rules.
# [[filter.rules]]
# pattern = "cronbach"
# category = "statistics"
"#;

const EXAMPLE_TOPIC: &str = r#"{
  "topic": {
    "id": 1,
    "name": "Psychological Safety",
    "keyConcepts": ["Humble Leadership", "Inclusive Leadership"],
    "focus": "Psychological safety is the belief that taking interpersonal risks carries no punishment; it is central to learning and innovation in teams."
  },
  "questions": {
    "mc_existing": [
      {
        "id": "t1-mc-1",
        "stem": "What does psychological safety primarily enable in teams?",
        "explanation": "Safe teams surface mistakes early and learn from them.",
        "options": [
          { "text": "Learning from mistakes without fear of blame", "correct": true },
          { "text": "Higher salaries", "correct": false },
          { "text": "Less need for meetings", "correct": false },
          { "text": "Automatic promotion", "correct": false }
        ]
      }
    ],
    "mc_generated": [],
    "open_existing": [
      {
        "id": "t1-open-1",
        "stem": "Define psychological safety and name one leadership style that fosters it.",
        "modelAnswer": "The shared belief that interpersonal risk-taking is safe; fostered by humble or inclusive leadership."
      }
    ],
    "open_generated": []
  }
}
"#;
