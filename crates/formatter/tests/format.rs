use formatter::{format_source, Config};

fn fmt(source: &str) -> String {
    format_source(source, &Config::default()).unwrap()
}

#[test]
fn keywords_are_uppercased() {
    assert_eq!(fmt("from alpine\n"), "FROM alpine\n");
    assert_eq!(fmt("workdir /app\n"), "WORKDIR /app\n");
    assert_eq!(fmt("stopsignal SIGTERM\n"), "STOPSIGNAL SIGTERM\n");
}

#[test]
fn operator_placement_follows_the_source() {
    let trailing = "\
run apt-get update && \\
  apt-get install -y curl # install tools
";
    assert_eq!(
        fmt(trailing),
        "\
RUN apt-get update && \\
    apt-get install -y curl # install tools
"
    );

    let leading = "\
RUN apt-get update \\
      && apt-get install -y curl
";
    assert_eq!(
        fmt(leading),
        "\
RUN apt-get update \\
    && apt-get install -y curl
"
    );
}

#[test]
fn run_flags_keep_the_payload_on_its_own_line() {
    let input = "\
run --mount=type=cache,target=/root/.cache \\
  go build -o /out/app ./cmd/app
";
    assert_eq!(
        fmt(input),
        "\
RUN --mount=type=cache,target=/root/.cache \\
    go build -o /out/app ./cmd/app
"
    );
}

#[test]
fn semicolon_chains_collapse() {
    assert_eq!(
        fmt("RUN mkdir -p /app;   cd /app\n"),
        "RUN mkdir -p /app; cd /app\n"
    );
}

#[test]
fn cmd_families_come_out_in_exec_form() {
    assert_eq!(fmt("cmd echo hello\n"), "CMD [\"echo\", \"hello\"]\n");
    assert_eq!(
        fmt("CMD nginx -g 'daemon off;'\n"),
        "CMD [\"nginx\", \"-g\", \"daemon off;\"]\n"
    );
    assert_eq!(
        fmt("entrypoint [\"/start.sh\"]\n"),
        "ENTRYPOINT [\"/start.sh\"]\n"
    );
    assert_eq!(
        fmt("SHELL [\"/bin/bash\",\"-c\"]\n"),
        "SHELL [\"/bin/bash\", \"-c\"]\n"
    );
}

#[test]
fn cmd_with_operators_keeps_its_shell() {
    assert_eq!(
        fmt("CMD echo started && tail -f /dev/null\n"),
        "CMD [\"/bin/sh\", \"-c\", \"echo started && tail -f /dev/null\"]\n"
    );
}

#[test]
fn labels_sort_and_quote() {
    assert_eq!(
        fmt("label version=1.0 name=\"web app\"\n"),
        "LABEL name=\"web app\" version=\"1.0\"\n"
    );
}

#[test]
fn maintainer_rewrites_to_the_authors_label() {
    assert_eq!(
        fmt("MAINTAINER Ada Lovelace <ada@example.com>\n"),
        "LABEL org.opencontainers.image.authors=\"Ada Lovelace <ada@example.com>\"\n"
    );
}

#[test]
fn env_pairs_reindent_and_legacy_form_stays() {
    let pairs = "\
env PATH=/usr/local/bin:$PATH \\
        APP_HOME=/srv
";
    assert_eq!(
        fmt(pairs),
        "\
ENV PATH=/usr/local/bin:$PATH \\
    APP_HOME=/srv
"
    );
    assert_eq!(fmt("ENV JAVA_HOME /usr/lib/jvm\n"), "ENV JAVA_HOME /usr/lib/jvm\n");
}

#[test]
fn redirect_spacing_is_configurable() {
    let input = "RUN sort /data >/out 2>&1\n";
    assert_eq!(fmt(input), "RUN sort /data >/out 2>&1\n");
    let spaced = Config {
        space_redirects: true,
        ..Config::default()
    };
    assert_eq!(
        format_source(input, &spaced).unwrap(),
        "RUN sort /data > /out 2>&1\n"
    );
}

#[test]
fn indent_width_is_configurable() {
    let config = Config {
        indent_size: 2,
        ..Config::default()
    };
    let input = "\
RUN apt-get update && \\
      apt-get install -y git
";
    assert_eq!(
        format_source(input, &config).unwrap(),
        "\
RUN apt-get update && \\
  apt-get install -y git
"
    );
}

#[test]
fn zero_indent_is_rejected() {
    let config = Config {
        indent_size: 0,
        ..Config::default()
    };
    let err = format_source("FROM alpine\n", &config).unwrap_err();
    assert!(err.to_string().contains("indent_size"));
}

#[test]
fn trailing_newline_policy() {
    assert_eq!(fmt("FROM alpine"), "FROM alpine\n");
    let bare = Config {
        trailing_newline: false,
        ..Config::default()
    };
    assert_eq!(format_source("FROM alpine\n\n", &bare).unwrap(), "FROM alpine");
}

#[test]
fn onbuild_wraps_a_formatted_child() {
    assert_eq!(fmt("onbuild run echo hi\n"), "ONBUILD RUN echo hi\n");
    assert_eq!(
        fmt("ONBUILD copy . /srv\n"),
        "ONBUILD COPY . /srv\n"
    );
}

#[test]
fn healthcheck_keeps_its_options() {
    assert_eq!(
        fmt("healthcheck --interval=30s CMD curl -f http://localhost/\n"),
        "HEALTHCHECK --interval=30s CMD curl -f http://localhost/\n"
    );
}

#[test]
fn from_keeps_platform_and_stage() {
    assert_eq!(
        fmt("from --platform=linux/amd64 golang:1.22 as build\n"),
        "FROM --platform=linux/amd64 golang:1.22 as build\n"
    );
}

#[test]
fn a_whole_file_comes_out_canonical() {
    let input = "\
# syntax=docker/dockerfile:1

from golang:1.22 as build
workdir /src
copy . .
run --mount=type=cache,target=/root/.cache \\
  go build -o /out/app ./cmd/app

from alpine:3.20
label version=1.0 maintainer=dev@example.com
env PATH=/usr/local/bin:$PATH \\
    APP_HOME=/srv
copy --from=build /out/app /usr/local/bin/app
expose 8080
user nobody
cmd /usr/local/bin/app --serve
";
    let expected = "\
# syntax=docker/dockerfile:1

FROM golang:1.22 as build
WORKDIR /src
COPY . .
RUN --mount=type=cache,target=/root/.cache \\
    go build -o /out/app ./cmd/app

FROM alpine:3.20
LABEL maintainer=\"dev@example.com\" version=\"1.0\"
ENV PATH=/usr/local/bin:$PATH \\
    APP_HOME=/srv
COPY --from=build /out/app /usr/local/bin/app
EXPOSE 8080
USER nobody
CMD [\"/usr/local/bin/app\", \"--serve\"]
";
    assert_eq!(fmt(input), expected);
}
