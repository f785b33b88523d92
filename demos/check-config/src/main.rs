mod cli;

use clap::Parser;
use cli::Args;
use json_output_config::prelude::*;
use log::info;
use serde_json::{json, Value};
use std::fs;

fn load_config(path: &str) -> Result<Config, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{path}': {e}"))?;
    Config::parse(&content).map_err(|e| e.to_string())
}

fn transport_summary(transport: &SyslogTransport) -> Value {
    match transport {
        SyslogTransport::Tcp(tcp) => json!({
            "type": "tcp",
            "hostname": tcp.hostname,
            "port": tcp.port,
            "blocking": tcp.blocking,
        }),
        SyslogTransport::Udp(udp) => json!({
            "type": "udp",
            "hostname": udp.hostname,
            "port": udp.port,
        }),
    }
}

fn server_summary(server: &ServerOutput) -> Value {
    json!({
        "name": server.name,
        "port": server.port,
        "blocking": server.blocking,
    })
}

fn send_summary(send: &SendOutput) -> Value {
    json!({
        "name": send.name,
        "ip": send.addr,
        "port": send.port,
        "protocol": send.proto.to_string(),
        "blocking": send.blocking,
    })
}

fn file_summary(file: &FileOutput) -> Value {
    json!({
        "name": file.name,
        "path": file.path_pattern,
        "prefix": file.prefix,
        "timeWindow": file.window_size,
        "timeAlignment": file.window_align,
        "compression": file.compression.to_string(),
    })
}

fn kafka_summary(kafka: &KafkaOutput) -> Value {
    json!({
        "name": kafka.name,
        "brokers": kafka.brokers,
        "topic": kafka.topic,
        "partition": kafka.partition.to_string(),
        "brokerVersion": kafka.broker_fallback,
        "blocking": kafka.blocking,
        "performanceTuning": kafka.perf_tuning,
        "properties": kafka.properties,
    })
}

fn syslog_summary(syslog: &SyslogOutput) -> Value {
    json!({
        "name": syslog.name,
        "facility": syslog.priority.facility,
        "severity": syslog.priority.severity,
        "hostname": syslog.hostname.to_string(),
        "program": syslog.program,
        "procId": syslog.proc_id,
        "transport": transport_summary(&syslog.transport),
    })
}

fn summarize_all<T>(outputs: &[T], f: fn(&T) -> Value) -> Value {
    Value::Array(outputs.iter().map(f).collect())
}

fn summary(config: &Config) -> Value {
    let format = config.format();
    let outputs = config.outputs();

    json!({
        "format": {
            "tcpFlags": format.tcp_flags.to_string(),
            "timestamp": format.timestamp.to_string(),
            "protocol": format.proto.to_string(),
            "ignoreUnknown": format.ignore_unknown,
            "ignoreOptions": format.ignore_options,
            "nonPrintableChar": format.non_printable,
            "numericNames": format.numeric_names,
            "octetArrayAsUint": format.octets_as_uint,
            "splitBiflow": format.split_biflow,
            "detailedInfo": format.detailed_info,
            "templateInfo": format.template_info,
        },
        "outputs": {
            "print": summarize_all(&outputs.prints, |o| json!({ "name": o.name })),
            "server": summarize_all(&outputs.servers, server_summary),
            "send": summarize_all(&outputs.sends, send_summary),
            "file": summarize_all(&outputs.files, file_summary),
            "kafka": summarize_all(&outputs.kafkas, kafka_summary),
            "syslog": summarize_all(&outputs.syslogs, syslog_summary),
        },
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.verbose {
        info!("Config file: {}", args.config_file);
    }

    let config = load_config(&args.config_file)?;

    if args.verbose {
        for output in config.outputs().iter() {
            info!("<{}> output '{}'", output.kind(), output.name());
        }
    }

    let summary = summary(&config);
    let text = if args.compact {
        serde_json::to_string(&summary)?
    } else {
        serde_json::to_string_pretty(&summary)?
    };
    println!("{text}");

    Ok(())
}
