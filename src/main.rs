use lane_detector::prelude::*;

fn main() {
    // Demo stub: runs the pipeline on a synthetic dark frame
    let w = 640usize;
    let h = 480usize;
    let rgb = vec![0u8; w * h * 3];
    let frame = RgbView {
        w,
        h,
        stride: w,
        data: &rgb,
    };

    let mut analyzer = FrameAnalyzer::new(AnalyzerOptions::default());
    let advisor = DirectionAdvisor::new(AdvisorOptions::default());

    match analyzer.process(frame) {
        Ok(report) => match advisor.decide(&report.segments, w as u32) {
            Ok(direction) => println!(
                "direction={direction} segments={} latency_ms={:.3}",
                report.segments.len(),
                report.latency_ms
            ),
            Err(err) => eprintln!("advice failed: {err}"),
        },
        Err(err) => eprintln!("analysis failed: {err}"),
    }
}
