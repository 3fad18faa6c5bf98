//! 展示用格式化工具 - 金额、百分比、相对时间

/// 格式化为美元金额，如 `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;
    format!("{}${}.{:02}", sign, group_thousands(dollars), fraction)
}

/// 格式化为带符号的百分比，如 `+12.5%`
pub fn format_percentage(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, value)
}

/// 销售金额文本，如 `+$123.45`
pub fn format_sale_amount(amount: f64) -> String {
    format!("+${:.2}", amount)
}

/// 相对时间标签：不足 60 分钟按分钟，否则按小时
pub fn elapsed_label(minutes: u32) -> String {
    if minutes < 60 {
        plural(minutes, "minute")
    } else {
        plural(minutes / 60, "hour")
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{} {} ago", n, unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}
