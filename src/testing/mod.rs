mod fake_text_client;

pub use fake_text_client::FakeTextGenerationClient;
