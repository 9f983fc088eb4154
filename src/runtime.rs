//! Embedded awk runtime library (spec §4.4).
//!
//! A single immutable text asset concatenated into every emitted program.
//! Function names and argument order are a stable ABI — rewrites must keep
//! them, the same way the teacher keeps `dialect.rs`'s translation tables as
//! plain data rather than scattering the rules across the generator.

/// Helpers emitted into every generated program regardless of dialect.
pub const RUNTIME_LIB: &str = r#"
function abs(x) {
    return x < 0 ? -x : x;
}

function max(x, y) {
    return x > y ? x : y;
}

function min(x, y) {
    return x < y ? x : y;
}

function ltrim(x, y,    re) {
    re = "^[" y "]+";
    gsub(re, "", x);
    return x;
}

function rtrim(x, y,    re) {
    re = "[" y "]+$";
    gsub(re, "", x);
    return x;
}

function trim(x, y) {
    return rtrim(ltrim(x, y), y);
}

function replace(x, y, z) {
    gsub(y, z, x);
    return x;
}

function like2regex(pattern,    anchored_start, anchored_end, inner) {
    gsub(/^"/, "", pattern);
    gsub(/"$/, "", pattern);

    anchored_start = 1;
    anchored_end = 1;
    inner = pattern;

    if (substr(inner, 1, 1) == "%") {
        anchored_start = 0;
        inner = substr(inner, 2);
    }
    if (length(inner) > 0 && substr(inner, length(inner), 1) == "%") {
        anchored_end = 0;
        inner = substr(inner, 1, length(inner) - 1);
    }

    gsub(/%/, ".*", inner);

    return (anchored_start ? "^" : "") inner (anchored_end ? "$" : "");
}

function ip2bin(ip,    parts, n, i, bits) {
    n = split(ip, parts, ".");
    bits = "";
    for (i = 1; i <= n; i++) {
        bits = bits sprintf("%08d", dec2bin(parts[i] + 0));
    }
    return bits;
}

function dec2bin(n,    bits, i) {
    bits = "";
    for (i = 0; i < 8; i++) {
        bits = (n % 2) bits;
        n = int(n / 2);
    }
    return bits;
}

function bin2dec(bits,    n, i, c) {
    n = 0;
    for (i = 1; i <= length(bits); i++) {
        c = substr(bits, i, 1);
        n = n * 2 + (c + 0);
    }
    return n;
}

function bin2ip(bin,    out, i) {
    out = bin2dec(substr(bin, 1, 8));
    for (i = 2; i <= 4; i++) {
        out = out "." bin2dec(substr(bin, (i - 1) * 8 + 1, 8));
    }
    return out;
}

function ip_in_cidr(ip, cidr,    parts, net, maskbits, ip_bin, net_bin) {
    split(cidr, parts, "/");
    net = parts[1];
    maskbits = parts[2] + 0;
    ip_bin = ip2bin(ip);
    net_bin = ip2bin(net);
    return substr(ip_bin, 1, maskbits) == substr(net_bin, 1, maskbits);
}

function mask_ip(ip, maskbits,    bin, kept, i, padded) {
    bin = ip2bin(ip);
    kept = substr(bin, 1, maskbits);
    padded = kept;
    for (i = maskbits + 1; i <= 32; i++) {
        padded = padded "0";
    }
    return bin2ip(padded);
}
"#;

/// Appended only when the active dialect is `gawk` (spec §4.2, §4.3).
pub const GAWK_EXTRAS: &str = r#"
function submatch(value, pattern, group,    groups, n) {
    n = match(value, pattern, groups);
    if (n == 0) {
        return "";
    }
    return groups[group];
}
"#;

/// Every function name the runtime library promises as part of its stable
/// ABI (spec §4.4). Used by a unit test to guard against accidental renames.
pub const RUNTIME_FUNCTION_NAMES: &[&str] = &[
    "abs", "max", "min", "ltrim", "rtrim", "trim", "replace", "like2regex",
    "ip2bin", "bin2ip", "ip_in_cidr", "mask_ip",
];

pub const GAWK_FUNCTION_NAMES: &[&str] = &["submatch"];
