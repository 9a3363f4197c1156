//! Shared inputs for the formatting benchmarks.

/// Two-stage build exercising continuations, flags, labels and an
/// exec-form CMD.
pub const MULTI_STAGE: &str = "\
# syntax=docker/dockerfile:1
FROM golang:1.22 AS build
WORKDIR /src
COPY go.mod go.sum ./
RUN --mount=type=cache,target=/go/pkg \\
    go mod download && \\
    # compile statically
    CGO_ENABLED=0 go build -o /out/app ./cmd/app

FROM alpine:3.20
LABEL version=\"1.0\" maintainer=\"ops\"
ENV PATH=/usr/local/bin:$PATH \\
    APP_HOME=/srv/app
COPY --from=build /out/app /usr/local/bin/app
EXPOSE 8080
CMD [\"app\", \"--serve\"]
";

/// RUN instruction with a heredoc body, the script-mode path.
pub const HEREDOC: &str = "\
FROM debian:bookworm
RUN <<EOF
set -e
apt-get update
apt-get install -y curl ca-certificates
rm -rf /var/lib/apt/lists/*
EOF
";

/// Builds a Dockerfile of `blocks` repeated stages for throughput runs.
pub fn synthetic(blocks: usize) -> String {
    let mut out = String::new();
    for i in 0..blocks {
        out.push_str(&format!("from alpine:3.20 as stage{i}\n"));
        out.push_str("workdir /app\n");
        out.push_str("run apk add --no-cache curl && \\\n    rm -rf /var/cache/apk\n");
        out.push_str(&format!("label stage=\"{i}\" tier=bench\n"));
        out.push('\n');
    }
    out
}
