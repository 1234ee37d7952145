//! Fixtures shared by the integration tests

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a tracing subscriber once; honours `RUST_LOG`
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Wrap body markup in a minimal page shell
#[allow(dead_code)]
pub fn entry_page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh">
<head><meta charset="UTF-8"><title>entry</title></head>
<body>
{body}
</body>
</html>"#
    )
}

/// A complete entry page exercising every section
#[allow(dead_code)]
pub fn full_entry_page() -> String {
    entry_page(
        r#"
<h1 class="J-lemma-title">Huawei</h1>
<div class="lemmaDescText_nFmCD">Chinese technology company</div>
<div class="lemmaSummary_yKMC1">
    <span>Huawei is a provider of ICT infrastructure</span><sup>[1]</sup>
    <sup>[2]</sup><span>, founded in 1987</span><sup>[3-4]</sup>.
</div>
<div class="J-basic-info">
    <div class="itemWrapper_ZNZh3">
        <dt class="itemName_LS0Jv">Founded</dt>
        <dd class="itemValue_AYbkR">1987<sup>[3]</sup></dd>
    </div>
    <div class="itemWrapper_ZNZh3">
        <dt class="itemName_LS0Jv">Headquarters</dt>
        <dd class="itemValue_AYbkR">Shenzhen</dd>
    </div>
</div>
<div class="catalogList_MR9Nd">
    <ul>
        <li class="level1"><span class="index">1</span><a>History</a></li>
        <li class="level2"><span>▪</span><a>Early years</a></li>
        <li class="level1"><span class="index">2</span><a>Products</a></li>
    </ul>
</div>
<div class="J-lemma-content">
    <div class="paraTitle_WslP_ level-1"><h2>History</h2></div>
    <div class="para content_pzMvr">Founded by Ren Zhengfei<sup>[5]</sup> <sup>[5]</sup> in Shenzhen.</div>
    <ol class="ordered_PAfTw">
        <li>1.Telecom equipment<sup>[6]</sup></li>
        <li>2.Consumer devices</li>
    </ol>
    <div class="paraTitle_WslP_ level-2"><h3>Products</h3></div>
    <ul class="unordered_ev4ae"><li>Phones<sup>[7]</sup><sup>[2]</sup></li></ul>
    <div data-module-type="table">
        <table>
            <tr><th>Year</th><th>Revenue</th></tr>
            <tr><td>2019</td><td>858.8<sup>[8]</sup></td></tr>
            <tr><td colspan="2">n/a</td></tr>
        </table>
    </div>
</div>
<div class="lemmaReference_Kx81a">
    <ul class="referenceList_Qc5h3">
        <li><a class="refLink_Bd1" href="//www.huawei.com/report">Annual report</a><span> [引用日期2024-03-01]</span></li>
        <li><a class="refLink_Bd1" href="/item/Shenzhen">Shenzhen</a></li>
    </ul>
</div>
"#,
    )
}
