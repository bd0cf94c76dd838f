#![allow(dead_code)]
//! Static log corpora used across harnesses.

/// Five cron session lines, four ssh logins and one kernel segfault. The
/// routine lines differ only in PIDs, IPs and ports, so each routine family
/// normalizes to a single message.
pub const CORPUS_ROUTINE_WITH_SEGFAULT: &[&str] = &[
    "Dec 10 06:55:01 server1 CRON[1201]: pam_unix(cron:session): session opened for user root by (uid=0)",
    "Dec 10 06:55:46 server1 sshd[2201]: Accepted password for admin from 192.168.1.10 port 52144 ssh2",
    "Dec 10 07:00:01 server1 CRON[1305]: pam_unix(cron:session): session opened for user root by (uid=0)",
    "Dec 10 07:02:13 server1 sshd[2288]: Accepted password for admin from 192.168.1.11 port 52190 ssh2",
    "Dec 10 07:05:01 server1 CRON[1412]: pam_unix(cron:session): session opened for user root by (uid=0)",
    "Dec 10 07:09:40 server1 sshd[2301]: Accepted password for admin from 10.0.0.7 port 40022 ssh2",
    "Dec 10 07:10:01 server1 CRON[1533]: pam_unix(cron:session): session opened for user root by (uid=0)",
    "Dec 10 07:15:01 server1 CRON[1601]: pam_unix(cron:session): session opened for user root by (uid=0)",
    "Dec 10 07:18:55 server1 sshd[2417]: Accepted password for admin from 192.168.1.12 port 53001 ssh2",
    "Dec 10 08:15:22 server1 kernel: segfault at 0xdeadbeef error 11",
];

/// Index of the segfault line in [`CORPUS_ROUTINE_WITH_SEGFAULT`].
pub const SEGFAULT_INDEX: usize = 9;

/// Lines the parser must reject.
pub const CORPUS_MALFORMED: &[&str] = &[
    "",
    "just some text",
    "Dec 10 06:55:01 server1 CRON[1201] no colon here",
    "2024-01-15 10:00:00 INFO Starting application",
    "server1 sshd[2201]: Accepted password for admin",
    r#"{"ts":"2024-01-15T10:00:00Z","level":"INFO","message":"Server started"}"#,
];

/// Messages consisting only of stop words.
pub const CORPUS_STOP_WORDS_ONLY: &[&str] = &[
    "Dec 10 06:55:01 server1 app: the and of",
    "Dec 10 06:55:02 server1 app: it is what it is",
    "Dec 10 06:55:03 server1 app: a",
];

/// Generate `n` routine syslog lines cycling through three templates.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let minute = i / 60 % 60;
            let second = i % 60;
            match i % 3 {
                0 => format!(
                    "Dec 10 06:{minute:02}:{second:02} server1 CRON[{}]: pam_unix(cron:session): session closed for user root",
                    1000 + i
                ),
                1 => format!(
                    "Dec 10 06:{minute:02}:{second:02} server1 sshd[{}]: Failed password for invalid user guest from 10.0.{}.{} port {} ssh2",
                    2000 + i,
                    i % 255,
                    (i * 7) % 255,
                    40000 + i
                ),
                _ => format!(
                    "Dec 10 06:{minute:02}:{second:02} server1 systemd[1]: Started Session {} of user admin.",
                    i
                ),
            }
        })
        .collect()
}
