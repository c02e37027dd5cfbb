// Environment variable carrying the backend base URL.
pub const BASE_URL_ENV: &str = "AGRICHAT_API_URL";

// Title the backend assigns to a freshly minted session. The backend renames
// the session after the first user message, which is why the session list is
// re-fetched after every send.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

// Shown as an assistant bubble when a send fails and the failure carries no
// usable message of its own.
pub const FALLBACK_ERROR_REPLY: &str =
    "Maaf, terjadi kesalahan saat menghubungi server kami.";

// Canned starter questions, same set the web UI offers as suggestion tiles.
pub const SUGGESTED_PROMPTS: &[&str] = &[
    "Kapan waktu terbaik untuk menanam jeruk nipis di Bandung?",
    "Prediksi hasil panen Padi di Surabaya tanggal 20 Januari",
    "Apakah cocok menanam Lengkuas di Jakarta bulan ini?",
    "Berapa estimasi hasil panen Jagung di Medan?",
];
